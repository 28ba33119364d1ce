//! Armor classes of common foes and standard difficulty targets.

use serde::{Deserialize, Serialize};

/// Armor class used for any creature missing from the table.
pub const DEFAULT_ENEMY_ARMOR_CLASS: i32 = 12;

const ENEMY_ARMOR_CLASSES: &[(&str, i32)] = &[
    ("goblin", 12),
    ("orc", 13),
    ("troll", 15),
    ("dragon", 18),
    ("bandit", 11),
    ("skeleton", 11),
    ("undead", 14),
];

/// Looks up a creature's armor class by name, ignoring case.
///
/// Unknown names get `DEFAULT_ENEMY_ARMOR_CLASS`.
#[must_use]
pub fn enemy_armor_class(name: &str) -> i32 {
    known_armor_class(name).unwrap_or(DEFAULT_ENEMY_ARMOR_CLASS)
}

/// Looks up a creature's armor class, returning `None` for unknown names.
#[must_use]
pub fn known_armor_class(name: &str) -> Option<i32> {
    let name = name.trim().to_lowercase();
    ENEMY_ARMOR_CLASSES
        .iter()
        .find(|(creature, _)| *creature == name)
        .map(|&(_, ac)| ac)
}

/// Standard target numbers for checks and encounters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Target 10.
    Easy,
    /// Target 12.
    Moderate,
    /// Target 15.
    Hard,
    /// Target 18.
    VeryHard,
    /// Target 20.
    Deadly,
}

impl Difficulty {
    /// The number a roll must meet or beat.
    #[must_use]
    pub fn target_number(self) -> i32 {
        match self {
            Self::Easy => 10,
            Self::Moderate => 12,
            Self::Hard => 15,
            Self::VeryHard => 18,
            Self::Deadly => 20,
        }
    }
}
