//! Application layer for the Narrative Orchestration context.

pub mod command_handlers;
pub mod session_locks;
