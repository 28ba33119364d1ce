//! Signed spell and ability effects.
//!
//! A spell's dice text may carry a leading `-` to mean "restore this much
//! health". The sign is lifted out here into an explicit `EffectKind`, so
//! the dice parser never has to understand it.

use questlog_core::rng::DeterministicRng;
use serde::{Deserialize, Serialize};

use super::dice::{DamageResult, DiceFormula, evaluate_damage};

/// Direction of an effect on hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Removes hit points from the target.
    Damage,
    /// Restores hit points to the target.
    Heal,
}

/// Magnitude plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellEffect {
    /// How much, as a dice formula.
    pub magnitude: DiceFormula,
    /// Which way.
    pub kind: EffectKind,
}

/// A rolled effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRoll {
    /// Direction of the effect.
    pub kind: EffectKind,
    /// Non-negative amount of hit points affected.
    pub amount: i32,
    /// The underlying dice roll.
    pub roll: DamageResult,
}

impl SpellEffect {
    /// A damaging effect.
    #[must_use]
    pub fn damage(magnitude: DiceFormula) -> Self {
        Self {
            magnitude,
            kind: EffectKind::Damage,
        }
    }

    /// A healing effect.
    #[must_use]
    pub fn heal(magnitude: DiceFormula) -> Self {
        Self {
            magnitude,
            kind: EffectKind::Heal,
        }
    }

    /// Parses effect text such as `2d6+2` (damage) or `-3d6` (healing).
    ///
    /// Text without a formula, such as `0`, gives an effect with no
    /// magnitude.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.strip_prefix('-') {
            Some(rest) => Self::heal(DiceFormula::parse(rest)),
            None => Self::damage(DiceFormula::parse(trimmed)),
        }
    }

    /// Returns `true` when the effect changes nothing.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.magnitude.is_none()
    }

    /// Rolls the magnitude. The amount never drops below zero.
    pub fn evaluate(&self, rng: &mut dyn DeterministicRng) -> EffectRoll {
        let roll = evaluate_damage(&self.magnitude, rng);
        EffectRoll {
            kind: self.kind,
            amount: roll.total.max(0),
            roll,
        }
    }
}
