//! Learned spells and the outcome of casting one.

use chrono::{DateTime, Utc};
use questlog_rules::domain::attack::AttackOutcome;
use questlog_rules::domain::effects::{EffectRoll, SpellEffect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Slot a spell occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlotType {
    /// Class ability, usable at will.
    #[default]
    #[serde(rename = "ability")]
    Ability,
    /// Minor magic.
    #[serde(rename = "cantrip")]
    Cantrip,
    /// First-circle spell.
    #[serde(rename = "1st_level")]
    FirstLevel,
    /// Second-circle spell.
    #[serde(rename = "2nd_level")]
    SecondLevel,
}

/// A spell known by a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spell {
    /// Spell identifier.
    pub id: Uuid,
    /// Owning character.
    pub character_id: Uuid,
    /// Display name.
    pub spell_name: String,
    /// Slot the spell uses.
    pub slot_type: SlotType,
    /// Effect text such as `3d6` or `-3d6`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_dice: Option<String>,
    /// Flavor text.
    pub description: String,
    /// When the spell was learned.
    pub learned_at: DateTime<Utc>,
}

impl Default for Spell {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            character_id: Uuid::nil(),
            spell_name: String::new(),
            slot_type: SlotType::default(),
            damage_dice: None,
            description: String::new(),
            learned_at: DateTime::<Utc>::default(),
        }
    }
}

impl Spell {
    /// The spell's signed effect. Spells without dice have no effect.
    #[must_use]
    pub fn effect(&self) -> SpellEffect {
        SpellEffect::parse(self.damage_dice.as_deref().unwrap_or_default())
    }
}

/// What happened when a spell was cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum CastResult {
    /// Utility spell; nothing rolled.
    NoEffect,
    /// The caster healed themselves.
    Healed {
        /// The healing roll.
        roll: EffectRoll,
        /// Hit points actually restored after clamping.
        restored: i32,
        /// Caster's hit points afterwards.
        current_hp: i32,
    },
    /// The spell was used as an attack.
    Attack {
        /// Outcome of the to-hit and damage rolls.
        outcome: AttackOutcome,
    },
}
