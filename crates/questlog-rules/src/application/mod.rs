//! Application layer for the Rules & Resolution context.

pub mod command_handlers;
pub mod query_handlers;
