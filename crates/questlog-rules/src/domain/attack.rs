//! Two-stage attack resolution: a to-hit gate, then damage.

use questlog_core::rng::DeterministicRng;
use serde::{Deserialize, Serialize};

use super::dice::{DamageResult, DiceFormula, evaluate_damage, roll_to_hit};

/// Result of a single attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Whether the attack connected.
    pub hit: bool,
    /// The face showing on the d20.
    pub natural_roll: u32,
    /// Natural roll plus attack bonus.
    pub attack_total: i32,
    /// The armor class the attack was made against.
    pub armor_class: i32,
    /// Damage dealt; zero on a miss.
    pub damage: i32,
    /// The damage roll, absent on a miss.
    pub damage_roll: Option<DamageResult>,
    /// Human-readable summary.
    pub description: String,
}

/// An attack hits when its total meets or beats the armor class.
#[must_use]
pub fn is_hit(attack_total: i32, armor_class: i32) -> bool {
    attack_total >= armor_class
}

/// Resolves one attack.
///
/// Damage dice are only rolled when the to-hit roll succeeds, so a miss
/// consumes exactly one draw from `rng`.
pub fn resolve_attack(
    attack_bonus: i32,
    armor_class: i32,
    damage_formula: &str,
    rng: &mut dyn DeterministicRng,
) -> AttackOutcome {
    let to_hit = roll_to_hit(attack_bonus, rng);
    let attack_total = to_hit.total;

    if !is_hit(attack_total, armor_class) {
        return AttackOutcome {
            hit: false,
            natural_roll: to_hit.natural_roll,
            attack_total,
            armor_class,
            damage: 0,
            damage_roll: None,
            description: format!("Attack Roll: {attack_total} vs AC {armor_class} - MISS!"),
        };
    }

    let damage_roll = evaluate_damage(&DiceFormula::parse(damage_formula), rng);
    let damage = damage_roll.total;

    AttackOutcome {
        hit: true,
        natural_roll: to_hit.natural_roll,
        attack_total,
        armor_class,
        damage,
        damage_roll: Some(damage_roll),
        description: format!(
            "Attack Roll: {attack_total} vs AC {armor_class} - HIT! Damage: {damage}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questlog_core::rng::SystemRng;
    use questlog_test_support::SequenceRng;

    #[test]
    fn test_is_hit_ties_favor_attacker() {
        assert!(is_hit(12, 12));
        assert!(is_hit(13, 12));
        assert!(!is_hit(11, 12));
    }

    #[test]
    fn test_miss_never_rolls_damage() {
        // Only one value is scripted: a damage roll would exhaust the sequence.
        let mut rng = SequenceRng::new(vec![5]);

        let outcome = resolve_attack(2, 12, "2d6+2", &mut rng);

        assert!(!outcome.hit);
        assert_eq!(outcome.damage, 0);
        assert!(outcome.damage_roll.is_none());
        assert_eq!(outcome.attack_total, 7);
        assert_eq!(rng.draws(), 1);
        assert_eq!(outcome.description, "Attack Roll: 7 vs AC 12 - MISS!");
    }

    #[test]
    fn test_hit_rolls_damage_once() {
        let mut rng = SequenceRng::new(vec![15, 4, 6]);

        let outcome = resolve_attack(3, 12, "2d6+2", &mut rng);

        assert!(outcome.hit);
        assert_eq!(outcome.natural_roll, 15);
        assert_eq!(outcome.attack_total, 18);
        assert_eq!(outcome.damage, 12);
        assert_eq!(outcome.damage_roll.as_ref().unwrap().rolls, vec![4, 6]);
        assert_eq!(rng.draws(), 3);
        assert_eq!(
            outcome.description,
            "Attack Roll: 18 vs AC 12 - HIT! Damage: 12"
        );
    }

    #[test]
    fn test_exact_tie_is_a_hit() {
        let mut rng = SequenceRng::new(vec![10, 3]);

        let outcome = resolve_attack(2, 12, "1d6", &mut rng);

        assert!(outcome.hit);
        assert_eq!(outcome.attack_total, 12);
        assert_eq!(outcome.damage, 3);
    }

    #[test]
    fn test_hit_with_malformed_formula_deals_no_damage() {
        let mut rng = SequenceRng::new(vec![20]);

        let outcome = resolve_attack(0, 10, "a sharp look", &mut rng);

        assert!(outcome.hit);
        assert_eq!(outcome.damage, 0);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_huge_attack_bonus_hits_without_overflow() {
        let mut rng = SequenceRng::new(vec![5, 3]);

        let outcome = resolve_attack(i32::MAX, 12, "1d6", &mut rng);

        assert!(outcome.hit);
        assert_eq!(outcome.attack_total, i32::MAX);
        assert_eq!(outcome.damage, 3);
    }

    #[test]
    fn test_outcomes_are_consistent_over_many_trials() {
        let mut rng = SystemRng::seeded(314);
        for _ in 0..2_000 {
            let outcome = resolve_attack(4, 15, "1d8+1", &mut rng);
            assert_eq!(outcome.hit, outcome.attack_total >= 15);
            if outcome.hit {
                assert!((2..=9).contains(&outcome.damage));
            } else {
                assert_eq!(outcome.damage, 0);
            }
        }
    }
}
