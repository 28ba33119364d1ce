//! Domain layer for the Session & Progress context.

pub mod aggregates;
pub mod backend;
pub mod commands;
pub mod messages;
