//! Dice formulas and the primitive rolls built on them.
//!
//! Formulas use the `NdM[+K]` shorthand. The parser never fails: text that
//! does not contain a formula yields `DiceFormula::NONE`, which rolls no
//! dice and totals zero. Subtraction is not part of the syntax; signed
//! effects such as healing are modelled by `SpellEffect`.

use std::fmt;
use std::sync::LazyLock;

use questlog_core::rng::DeterministicRng;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Largest dice pool the parser accepts.
pub const MAX_DICE: u32 = 100;
/// Largest die the parser accepts.
pub const MAX_FACES: u32 = 1_000;
/// Largest flat bonus the parser accepts.
pub const MAX_MODIFIER: i32 = 10_000;

static FORMULA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)d(\d+)(?:\+(\d+))?").expect("valid regex"));

/// A parsed `NdM+K` damage formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceFormula {
    /// Number of dice rolled.
    pub count: u32,
    /// Faces on each die.
    pub faces: u32,
    /// Flat amount added to the sum.
    pub modifier: i32,
}

impl DiceFormula {
    /// The "no damage" formula: rolls nothing and totals zero.
    pub const NONE: Self = Self {
        count: 0,
        faces: 0,
        modifier: 0,
    };

    /// Builds a formula, falling back to `NONE` when the dice are empty or
    /// out of range.
    #[must_use]
    pub fn new(count: u32, faces: u32, modifier: i32) -> Self {
        if count == 0
            || faces == 0
            || count > MAX_DICE
            || faces > MAX_FACES
            || modifier.abs() > MAX_MODIFIER
        {
            return Self::NONE;
        }
        Self {
            count,
            faces,
            modifier,
        }
    }

    /// Parses the first `NdM[+K]` occurrence in `text`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let Some(caps) = FORMULA_RE.captures(text) else {
            return Self::NONE;
        };
        let count = caps[1].parse::<u32>();
        let faces = caps[2].parse::<u32>();
        let modifier = caps
            .get(3)
            .map_or(Ok(0), |m| m.as_str().parse::<i32>());

        match (count, faces, modifier) {
            (Ok(count), Ok(faces), Ok(modifier)) => Self::new(count, faces, modifier),
            _ => Self::NONE,
        }
    }

    /// Returns `true` for the zero-damage formula.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.count == 0
    }
}

impl Default for DiceFormula {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("0");
        }
        write!(f, "{}d{}", self.count, self.faces)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// Outcome of a single d20 roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// The face showing on the d20.
    pub natural_roll: u32,
    /// Natural roll plus modifier.
    pub total: i32,
    /// Human-readable calculation, e.g. `1d20+3 = 15`.
    pub calculation: String,
}

/// Outcome of evaluating a damage formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Sum of the dice plus the modifier.
    pub total: i32,
    /// Each die in the order it was rolled.
    pub rolls: Vec<u32>,
    /// Human-readable summary, e.g. `2d6+3 = 10`.
    pub summary: String,
}

/// Exact spread of a damage formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageRange {
    /// Every die showing 1.
    pub min: i32,
    /// Every die showing its highest face.
    pub max: i32,
    /// Arithmetic mean of the sum.
    pub average: f64,
}

/// Rolls every die in `formula` and adds the modifier.
#[allow(clippy::cast_possible_wrap)]
pub fn evaluate_damage(formula: &DiceFormula, rng: &mut dyn DeterministicRng) -> DamageResult {
    if formula.is_none() {
        return DamageResult {
            total: 0,
            rolls: Vec::new(),
            summary: "No damage".to_owned(),
        };
    }

    let rolls: Vec<u32> = (0..formula.count)
        .map(|_| rng.next_u32_range(1, formula.faces))
        .collect();
    let total = rolls.iter().map(|&r| r as i32).sum::<i32>() + formula.modifier;

    DamageResult {
        total,
        rolls,
        summary: format!("{formula} = {total}"),
    }
}

/// Rolls a d20 and adds `modifier`. The total saturates at the `i32` bounds.
#[allow(clippy::cast_possible_wrap)]
pub fn roll_to_hit(modifier: i32, rng: &mut dyn DeterministicRng) -> RollResult {
    let natural_roll = rng.next_u32_range(1, 20);
    let total = (natural_roll as i32).saturating_add(modifier);
    let calculation = match modifier {
        0 => format!("1d20 = {total}"),
        m if m > 0 => format!("1d20+{m} = {total}"),
        m => format!("1d20{m} = {total}"),
    };

    RollResult {
        natural_roll,
        total,
        calculation,
    }
}

/// Computes the exact minimum, maximum and mean of `formula`.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn predict_damage_range(formula: &DiceFormula) -> DamageRange {
    if formula.is_none() {
        return DamageRange {
            min: 0,
            max: 0,
            average: 0.0,
        };
    }

    let count = formula.count as i32;
    let faces = formula.faces as i32;
    DamageRange {
        min: count + formula.modifier,
        max: count * faces + formula.modifier,
        average: f64::from(formula.count) * (f64::from(formula.faces) + 1.0) / 2.0
            + f64::from(formula.modifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questlog_core::rng::SystemRng;
    use questlog_test_support::SequenceRng;

    #[test]
    fn test_parse_full_formula() {
        assert_eq!(DiceFormula::parse("2d6+3"), DiceFormula::new(2, 6, 3));
    }

    #[test]
    fn test_parse_without_modifier() {
        let formula = DiceFormula::parse("1d8");
        assert_eq!(formula.count, 1);
        assert_eq!(formula.faces, 8);
        assert_eq!(formula.modifier, 0);
    }

    #[test]
    fn test_parse_finds_formula_inside_prose() {
        assert_eq!(
            DiceFormula::parse("swing for 1d10+2 slashing"),
            DiceFormula::new(1, 10, 2)
        );
    }

    #[test]
    fn test_parse_nonsense_is_none_and_rolls_zero() {
        let formula = DiceFormula::parse("nonsense");
        assert!(formula.is_none());

        let mut rng = SequenceRng::new(vec![]);
        let result = evaluate_damage(&formula, &mut rng);
        assert_eq!(result.total, 0);
        assert!(result.rolls.is_empty());
        assert_eq!(result.summary, "No damage");
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_parse_ignores_leading_sign() {
        // Subtraction is not part of the grammar; the sign is simply skipped.
        assert_eq!(DiceFormula::parse("-3d6"), DiceFormula::new(3, 6, 0));
    }

    #[test]
    fn test_parse_zero_dice_or_faces_is_none() {
        assert!(DiceFormula::parse("0d6").is_none());
        assert!(DiceFormula::parse("2d0").is_none());
    }

    #[test]
    fn test_parse_out_of_range_is_none() {
        assert!(DiceFormula::parse("100000d6").is_none());
        assert!(DiceFormula::parse("99999999999d6").is_none());
        assert!(DiceFormula::parse("1d6+99999999999").is_none());
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(DiceFormula::new(2, 6, 3).to_string(), "2d6+3");
        assert_eq!(DiceFormula::new(1, 8, 0).to_string(), "1d8");
        assert_eq!(DiceFormula::new(1, 4, -1).to_string(), "1d4-1");
        assert_eq!(DiceFormula::NONE.to_string(), "0");
    }

    #[test]
    fn test_evaluate_damage_sums_rolls_and_modifier() {
        let mut rng = SequenceRng::new(vec![4, 3]);
        let result = evaluate_damage(&DiceFormula::new(2, 6, 3), &mut rng);

        assert_eq!(result.rolls, vec![4, 3]);
        assert_eq!(result.total, 10);
        assert_eq!(result.summary, "2d6+3 = 10");
    }

    #[test]
    fn test_evaluate_damage_stays_within_bounds_over_many_trials() {
        let mut rng = SystemRng::seeded(2026);
        let formula = DiceFormula::parse("3d8+2");
        let range = predict_damage_range(&formula);

        for _ in 0..5_000 {
            let result = evaluate_damage(&formula, &mut rng);
            assert!(result.total >= range.min && result.total <= range.max);
            assert_eq!(result.rolls.len(), 3);
            assert!(result.rolls.iter().all(|r| (1..=8).contains(r)));
        }
    }

    #[test]
    fn test_evaluate_damage_mean_approaches_prediction() {
        let mut rng = SystemRng::seeded(11);
        let formula = DiceFormula::parse("2d6+2");
        let trials = 20_000;
        let sum: i64 = (0..trials)
            .map(|_| i64::from(evaluate_damage(&formula, &mut rng).total))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = sum as f64 / f64::from(trials);
        assert!((mean - 9.0).abs() < 0.15, "sample mean {mean}");
    }

    #[test]
    fn test_roll_to_hit_adds_modifier() {
        let mut rng = SequenceRng::new(vec![12]);
        let roll = roll_to_hit(3, &mut rng);

        assert_eq!(roll.natural_roll, 12);
        assert_eq!(roll.total, 15);
        assert_eq!(roll.calculation, "1d20+3 = 15");
    }

    #[test]
    fn test_roll_to_hit_calculation_formats() {
        let mut rng = SequenceRng::new(vec![10, 10]);
        assert_eq!(roll_to_hit(0, &mut rng).calculation, "1d20 = 10");
        assert_eq!(roll_to_hit(-2, &mut rng).calculation, "1d20-2 = 8");
    }

    #[test]
    fn test_roll_to_hit_saturates_extreme_modifiers() {
        let mut rng = SequenceRng::new(vec![5, 5]);
        assert_eq!(roll_to_hit(i32::MAX, &mut rng).total, i32::MAX);
        assert_eq!(roll_to_hit(i32::MIN, &mut rng).total, i32::MIN + 5);
    }

    #[test]
    fn test_roll_to_hit_natural_roll_is_a_d20() {
        let mut rng = SystemRng::seeded(5);
        for _ in 0..2_000 {
            let roll = roll_to_hit(1, &mut rng);
            assert!((1..=20).contains(&roll.natural_roll));
            assert_eq!(roll.total, roll.natural_roll as i32 + 1);
        }
    }

    #[test]
    fn test_predict_damage_range_two_d6_plus_two() {
        let range = predict_damage_range(&DiceFormula::parse("2d6+2"));
        assert_eq!(range.min, 4);
        assert_eq!(range.max, 14);
        assert!((range.average - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_predict_damage_range_odd_faces_average_is_fractional() {
        let range = predict_damage_range(&DiceFormula::parse("1d8"));
        assert_eq!(range.min, 1);
        assert_eq!(range.max, 8);
        assert!((range.average - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_predict_damage_range_none_is_zero() {
        let range = predict_damage_range(&DiceFormula::NONE);
        assert_eq!(range.min, 0);
        assert_eq!(range.max, 0);
        assert!(range.average.abs() < f64::EPSILON);
    }
}
