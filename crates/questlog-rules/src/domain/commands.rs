//! Commands for the Rules & Resolution context.

use questlog_core::error::DomainError;
use uuid::Uuid;

/// Largest attack bonus, in either direction, an attack may carry.
pub const MAX_ATTACK_BONUS: i32 = 1000;

/// Largest armor class an attack may be made against.
pub const MAX_ARMOR_CLASS: i32 = 1000;

/// Command to resolve a single attack.
#[derive(Debug, Clone)]
pub struct ResolveAttack {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Total to-hit bonus of the attacker.
    pub attack_bonus: i32,
    /// Explicit armor class; takes precedence over `target`.
    pub armor_class: Option<i32>,
    /// Creature name used to look up an armor class.
    pub target: Option<String>,
    /// Damage formula text, e.g. `1d8+2`.
    pub damage_formula: String,
}

impl ResolveAttack {
    /// Rejects bonuses and armor classes outside the playable range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the offending field.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(-MAX_ATTACK_BONUS..=MAX_ATTACK_BONUS).contains(&self.attack_bonus) {
            return Err(DomainError::Validation(format!(
                "attack_bonus must be between -{MAX_ATTACK_BONUS} and {MAX_ATTACK_BONUS}"
            )));
        }
        if self
            .armor_class
            .is_some_and(|armor_class| !(0..=MAX_ARMOR_CLASS).contains(&armor_class))
        {
            return Err(DomainError::Validation(format!(
                "armor_class must be between 0 and {MAX_ARMOR_CLASS}"
            )));
        }
        Ok(())
    }

    /// The armor class this attack is made against.
    #[must_use]
    pub fn effective_armor_class(&self) -> i32 {
        self.armor_class.unwrap_or_else(|| {
            crate::domain::bestiary::enemy_armor_class(self.target.as_deref().unwrap_or_default())
        })
    }
}
