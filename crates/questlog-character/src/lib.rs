//! Questlog: Character Management bounded context.
//!
//! Responsible for character sheets, class profiles, experience and
//! leveling, the inventory a character carries and the spells it knows.

pub mod application;
pub mod domain;
