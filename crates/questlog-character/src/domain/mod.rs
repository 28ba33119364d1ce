//! Domain layer for the Character Management context.

pub mod aggregates;
pub mod class;
pub mod commands;
pub mod inventory;
pub mod progression;
pub mod spells;
