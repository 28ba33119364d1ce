//! Domain layer for the Narrative Orchestration context.

pub mod commands;
pub mod extraction;
pub mod prompt;
pub mod reducer;
