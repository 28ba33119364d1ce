//! Query handlers for the Rules & Resolution context.
//!
//! Read-only previews that never touch randomness.

use serde::Serialize;

use crate::domain::bestiary::{DEFAULT_ENEMY_ARMOR_CLASS, known_armor_class};
use crate::domain::dice::{DiceFormula, predict_damage_range};

/// Damage preview for a formula.
#[derive(Debug, Serialize)]
pub struct DamageRangeView {
    /// The formula as understood by the parser (`0` when none was found).
    pub formula: String,
    /// Lowest possible total.
    pub min: i32,
    /// Highest possible total.
    pub max: i32,
    /// Mean total.
    pub average: f64,
}

/// Armor class lookup result.
#[derive(Debug, Serialize)]
pub struct ArmorClassView {
    /// The creature name as requested.
    pub name: String,
    /// The armor class to attack against.
    pub armor_class: i32,
    /// Whether the creature is in the table or the default was used.
    pub known: bool,
}

/// Predicts the damage spread of `formula_text`.
#[must_use]
pub fn predict_damage(formula_text: &str) -> DamageRangeView {
    let formula = DiceFormula::parse(formula_text);
    let range = predict_damage_range(&formula);
    DamageRangeView {
        formula: formula.to_string(),
        min: range.min,
        max: range.max,
        average: range.average,
    }
}

/// Looks up the armor class for a named creature.
#[must_use]
pub fn armor_class_for(name: &str) -> ArmorClassView {
    let known = known_armor_class(name);
    ArmorClassView {
        name: name.to_owned(),
        armor_class: known.unwrap_or(DEFAULT_ENEMY_ARMOR_CLASS),
        known: known.is_some(),
    }
}
