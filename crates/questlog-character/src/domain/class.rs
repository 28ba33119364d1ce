//! Character classes and their fixed profiles.

use std::fmt;

use questlog_rules::domain::abilities::{AttackStat, CharacterStats};
use serde::{Deserialize, Serialize};

/// A playable class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CharacterClass {
    /// Heavy melee fighter.
    #[default]
    Warrior,
    /// Fragile arcane caster.
    Mage,
    /// Nimble skirmisher.
    Rogue,
    /// Divine healer.
    Cleric,
}

/// Static numbers for a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassProfile {
    /// Hit points at level 1.
    pub max_hp: i32,
    /// Base to-hit bonus.
    pub attack: i32,
    /// Flat defense.
    pub defense: i32,
    /// Signature abilities shown on the sheet.
    pub abilities: [&'static str; 3],
}

/// A spell the class can learn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSpell {
    /// Spell name.
    pub name: &'static str,
    /// Effect text; a leading `-` heals, `0` does nothing.
    pub damage: &'static str,
    /// Resource cost.
    pub cost: u32,
    /// Flavor text.
    pub description: &'static str,
}

const fn spell(
    name: &'static str,
    damage: &'static str,
    cost: u32,
    description: &'static str,
) -> CatalogSpell {
    CatalogSpell {
        name,
        damage,
        cost,
        description,
    }
}

const WARRIOR_SPELLS: [CatalogSpell; 3] = [
    spell("Power Attack", "2d6+2", 10, "A devastating melee attack"),
    spell("Shield Bash", "1d8+1", 5, "Bash with shield for crowd control"),
    spell("Whirlwind", "2d6", 15, "Attack all enemies around you"),
];

const MAGE_SPELLS: [CatalogSpell; 3] = [
    spell("Fireball", "3d6", 20, "Hurl a ball of flames"),
    spell("Ice Storm", "2d8", 25, "Freeze enemies in ice"),
    spell("Teleport", "0", 10, "Escape to safety"),
];

const ROGUE_SPELLS: [CatalogSpell; 3] = [
    spell("Backstab", "2d8+3", 10, "Sneak attack from shadows"),
    spell("Dodge", "0", 5, "Avoid incoming attacks"),
    spell("Poison Blade", "1d6+3", 15, "Coat weapon with poison"),
];

const CLERIC_SPELLS: [CatalogSpell; 3] = [
    spell("Heal", "-3d6", 15, "Restore health to self or ally"),
    spell("Smite", "2d6+2", 20, "Holy strike against evil"),
    spell("Blessing", "0", 10, "Strengthen yourself or an ally"),
];

impl CharacterClass {
    /// Every class, in menu order.
    pub const ALL: [Self; 4] = [Self::Warrior, Self::Mage, Self::Rogue, Self::Cleric];

    /// Display name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warrior => "Warrior",
            Self::Mage => "Mage",
            Self::Rogue => "Rogue",
            Self::Cleric => "Cleric",
        }
    }

    /// Parses a class name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(name))
    }

    /// The class table.
    #[must_use]
    pub fn profile(self) -> ClassProfile {
        match self {
            Self::Warrior => ClassProfile {
                max_hp: 30,
                attack: 3,
                defense: 2,
                abilities: ["Power Attack", "Shield Bash", "Parry"],
            },
            Self::Mage => ClassProfile {
                max_hp: 15,
                attack: 0,
                defense: 0,
                abilities: ["Fireball", "Ice Storm", "Teleport"],
            },
            Self::Rogue => ClassProfile {
                max_hp: 20,
                attack: 2,
                defense: 1,
                abilities: ["Backstab", "Dodge", "Pickpocket"],
            },
            Self::Cleric => ClassProfile {
                max_hp: 25,
                attack: 1,
                defense: 2,
                abilities: ["Heal", "Smite", "Blessing"],
            },
        }
    }

    /// Ability scores a freshly created character of this class starts with.
    #[must_use]
    pub fn starting_stats(self) -> CharacterStats {
        let mut stats = CharacterStats::default();
        match self {
            Self::Warrior => stats.strength += 4,
            Self::Rogue => stats.dexterity += 4,
            Self::Mage => stats.intelligence += 4,
            Self::Cleric => {
                stats.constitution += 2;
                stats.wisdom += 2;
            }
        }
        stats
    }

    /// Ability used for the class's attack rolls.
    #[must_use]
    pub fn attack_stat(self) -> AttackStat {
        match self {
            Self::Rogue => AttackStat::Dexterity,
            Self::Warrior | Self::Mage | Self::Cleric => AttackStat::Strength,
        }
    }

    /// Spells this class may learn.
    #[must_use]
    pub fn spell_catalog(self) -> &'static [CatalogSpell] {
        match self {
            Self::Warrior => &WARRIOR_SPELLS,
            Self::Mage => &MAGE_SPELLS,
            Self::Rogue => &ROGUE_SPELLS,
            Self::Cleric => &CLERIC_SPELLS,
        }
    }

    /// Finds a catalog spell by name, ignoring case.
    #[must_use]
    pub fn catalog_spell(self, name: &str) -> Option<&'static CatalogSpell> {
        let name = name.trim();
        self.spell_catalog()
            .iter()
            .find(|spell| spell.name.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_table() {
        let rows: Vec<(i32, i32, i32)> = CharacterClass::ALL
            .into_iter()
            .map(|c| {
                let p = c.profile();
                (p.max_hp, p.attack, p.defense)
            })
            .collect();
        assert_eq!(rows, vec![(30, 3, 2), (15, 0, 0), (20, 2, 1), (25, 1, 2)]);
    }

    #[test]
    fn test_starting_stats_apply_class_bonus() {
        assert_eq!(CharacterClass::Warrior.starting_stats().strength, 14);
        assert_eq!(CharacterClass::Rogue.starting_stats().dexterity, 14);
        assert_eq!(CharacterClass::Mage.starting_stats().intelligence, 14);

        let cleric = CharacterClass::Cleric.starting_stats();
        assert_eq!((cleric.constitution, cleric.wisdom), (12, 12));
        assert_eq!(cleric.strength, 10);
        assert_eq!(cleric.charisma, 10);
    }

    #[test]
    fn test_only_rogue_attacks_with_dexterity() {
        assert_eq!(CharacterClass::Rogue.attack_stat(), AttackStat::Dexterity);
        assert_eq!(CharacterClass::Cleric.attack_stat(), AttackStat::Strength);
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(CharacterClass::from_name(" cleric "), Some(CharacterClass::Cleric));
        assert_eq!(CharacterClass::from_name("Bard"), None);
    }

    #[test]
    fn test_serializes_with_capitalized_name() {
        let json = serde_json::to_value(CharacterClass::Mage).unwrap();
        assert_eq!(json, "Mage");
    }

    #[test]
    fn test_catalog_lookup() {
        let heal = CharacterClass::Cleric.catalog_spell("heal").unwrap();
        assert_eq!(heal.damage, "-3d6");
        assert!(CharacterClass::Warrior.catalog_spell("Heal").is_none());
        assert_eq!(CharacterClass::Mage.spell_catalog().len(), 3);
    }
}
