//! Questlog Core: shared domain abstractions.
//!
//! This crate defines the traits and types that every bounded context
//! depends on: time, randomness, errors, the record store and the
//! narration gateway. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod narration;
pub mod record;
pub mod rng;
