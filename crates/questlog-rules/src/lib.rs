//! Questlog: Rules & Resolution bounded context.
//!
//! Dice rolling, damage formulas, ability modifiers, armor class lookups
//! and the two-stage attack resolution (to-hit gate, then damage).

pub mod application;
pub mod domain;
