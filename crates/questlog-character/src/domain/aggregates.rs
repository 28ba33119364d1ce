//! Aggregate roots for the Character Management context.

use chrono::{DateTime, Utc};
use questlog_core::clock::Clock;
use questlog_core::error::DomainError;
use questlog_rules::domain::abilities::{CharacterStats, compute_attack_bonus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::class::CharacterClass;
use super::progression::level_for_xp;

/// Longest accepted character name, in characters.
pub const MAX_NAME_LEN: usize = 30;

/// The aggregate root for a character.
///
/// Missing fields in a stored payload fall back to defaults rather than
/// failing to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Class, fixed at creation.
    pub class: CharacterClass,
    /// Current level, 1 through 10.
    pub level: u32,
    /// Total experience. Never decreases.
    pub xp: u32,
    /// Hit point ceiling.
    pub max_hp: i32,
    /// Current hit points, kept within `[0, max_hp]`.
    pub current_hp: i32,
    /// Ability scores.
    pub stats: CharacterStats,
    /// Optional flavor text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backstory: Option<String>,
    /// When the character was created.
    pub created_at: DateTime<Utc>,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            name: String::new(),
            class: CharacterClass::default(),
            level: 1,
            xp: 0,
            max_hp: 0,
            current_hp: 0,
            stats: CharacterStats::default(),
            backstory: None,
            created_at: DateTime::<Utc>::default(),
        }
    }
}

impl Character {
    /// Creates a level 1 character at full health with the class's starting
    /// stats.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty or
    /// longer than `MAX_NAME_LEN`.
    pub fn create(
        id: Uuid,
        name: &str,
        class: CharacterClass,
        backstory: Option<String>,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "character name must not be empty".into(),
            ));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "character name must be at most {MAX_NAME_LEN} characters"
            )));
        }

        let max_hp = class.profile().max_hp;
        Ok(Self {
            id,
            name: name.to_owned(),
            class,
            level: 1,
            xp: 0,
            max_hp,
            current_hp: max_hp,
            stats: class.starting_stats(),
            backstory: backstory
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty()),
            created_at: clock.now(),
        })
    }

    /// Sets current hit points, clamped to `[0, max_hp]`.
    pub fn set_current_hp(&mut self, hp: i32) {
        self.current_hp = hp.clamp(0, self.max_hp.max(0));
    }

    /// Removes hit points, stopping at zero. Returns the new total.
    pub fn apply_damage(&mut self, amount: u32) -> i32 {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.set_current_hp(self.current_hp.saturating_sub(amount));
        self.current_hp
    }

    /// Restores hit points, stopping at `max_hp`. Returns the amount
    /// actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.set_current_hp(self.current_hp.saturating_add(amount.max(0)));
        self.current_hp.saturating_sub(before)
    }

    /// Adds experience and raises the level to match. Returns `true` when
    /// the level went up.
    pub fn gain_xp(&mut self, amount: u32) -> bool {
        self.xp = self.xp.saturating_add(amount);
        let reached = level_for_xp(self.xp);
        if reached > self.level {
            self.level = reached;
            true
        } else {
            false
        }
    }

    /// `true` once hit points reach zero.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.current_hp <= 0
    }

    /// To-hit bonus: class base plus the class's attack ability modifier.
    #[must_use]
    pub fn attack_bonus(&self) -> i32 {
        compute_attack_bonus(
            self.class.profile().attack,
            &self.stats,
            self.class.attack_stat(),
        )
    }
}
