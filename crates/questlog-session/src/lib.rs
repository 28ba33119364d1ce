//! Questlog: Session & Progress bounded context.
//!
//! Responsible for game sessions, the world state a session tracks, the
//! append-only message log, and which narration backend a session uses.

pub mod application;
pub mod domain;
