//! Questlog: Narrative Orchestration bounded context.
//!
//! Builds the narrator's prompt, calls a narration backend, pulls
//! game-state signals out of the reply and folds them into the character
//! and session.

pub mod application;
pub mod domain;
pub mod gateway;
