//! Domain layer for the Rules & Resolution context.

pub mod abilities;
pub mod attack;
pub mod bestiary;
pub mod commands;
pub mod dice;
pub mod effects;
