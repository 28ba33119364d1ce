//! Ability scores and the modifiers derived from them.

use serde::{Deserialize, Serialize};

/// The six ability scores of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterStats {
    /// Physical power; drives melee attacks.
    pub strength: i32,
    /// Agility; drives finesse and ranged attacks.
    pub dexterity: i32,
    /// Endurance.
    pub constitution: i32,
    /// Reasoning and arcane study.
    pub intelligence: i32,
    /// Perception and insight.
    pub wisdom: i32,
    /// Force of personality.
    pub charisma: i32,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

/// Which ability an attack draws its modifier from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackStat {
    /// Ordinary melee attacks.
    #[default]
    Strength,
    /// Finesse and ranged attacks.
    Dexterity,
}

/// Modifier for an ability score: `⌊(score − 10) / 2⌋`.
///
/// Rounds toward negative infinity, so 9 gives −1 rather than 0.
#[must_use]
pub fn ability_modifier(score: i32) -> i32 {
    score.saturating_sub(10).div_euclid(2)
}

/// Total to-hit bonus: the class base plus the chosen ability modifier.
#[must_use]
pub fn compute_attack_bonus(base_attack: i32, stats: &CharacterStats, stat: AttackStat) -> i32 {
    let score = match stat {
        AttackStat::Strength => stats.strength,
        AttackStat::Dexterity => stats.dexterity,
    };
    base_attack.saturating_add(ability_modifier(score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_modifier_reference_values() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(12), 1);
        assert_eq!(ability_modifier(20), 5);
    }

    #[test]
    fn test_ability_modifier_floors_below_ten() {
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(7), -2);
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(0), -5);
    }

    #[test]
    fn test_ability_modifier_matches_floor_division_everywhere() {
        for score in -30..=40 {
            let expected = (f64::from(score - 10) / 2.0).floor();
            assert_eq!(f64::from(ability_modifier(score)), expected, "score {score}");
        }
    }

    #[test]
    fn test_attack_bonus_uses_strength_by_default() {
        let stats = CharacterStats {
            strength: 14,
            dexterity: 8,
            ..CharacterStats::default()
        };
        assert_eq!(compute_attack_bonus(3, &stats, AttackStat::Strength), 5);
    }

    #[test]
    fn test_attack_bonus_uses_dexterity_for_finesse() {
        let stats = CharacterStats {
            strength: 8,
            dexterity: 14,
            ..CharacterStats::default()
        };
        assert_eq!(compute_attack_bonus(2, &stats, AttackStat::Dexterity), 4);
        assert_eq!(compute_attack_bonus(2, &stats, AttackStat::Strength), 1);
    }

    #[test]
    fn test_extreme_scores_do_not_overflow() {
        assert_eq!(ability_modifier(i32::MIN), (i32::MIN).div_euclid(2));
        assert_eq!(ability_modifier(i32::MAX), (i32::MAX - 10).div_euclid(2));

        let stats = CharacterStats {
            strength: i32::MAX,
            ..CharacterStats::default()
        };
        assert_eq!(
            compute_attack_bonus(i32::MAX, &stats, AttackStat::Strength),
            i32::MAX
        );
    }

    #[test]
    fn test_missing_stats_default_to_ten() {
        let stats: CharacterStats = serde_json::from_str(r#"{ "strength": 16 }"#).unwrap();
        assert_eq!(stats.strength, 16);
        assert_eq!(stats.charisma, 10);
    }
}
