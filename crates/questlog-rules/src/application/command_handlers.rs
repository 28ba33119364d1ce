//! Command handlers for the Rules & Resolution context.

use std::sync::Mutex;

use questlog_core::error::DomainError;
use questlog_core::rng::DeterministicRng;
use tracing::info;

use crate::domain::attack::{AttackOutcome, resolve_attack};
use crate::domain::commands::ResolveAttack;

/// Handles the `ResolveAttack` command.
///
/// The `Mutex` is locked only for the duration of the synchronous roll.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an out-of-range bonus or armor
/// class, and `DomainError::Infrastructure` if the RNG mutex is poisoned.
pub fn handle_resolve_attack(
    command: &ResolveAttack,
    rng: &Mutex<dyn DeterministicRng + Send>,
) -> Result<AttackOutcome, DomainError> {
    command.validate()?;
    let armor_class = command.effective_armor_class();

    let outcome = {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        resolve_attack(
            command.attack_bonus,
            armor_class,
            &command.damage_formula,
            &mut *rng_guard,
        )
    };

    info!(
        correlation_id = %command.correlation_id,
        hit = outcome.hit,
        attack_total = outcome.attack_total,
        armor_class,
        damage = outcome.damage,
        "attack resolved"
    );

    Ok(outcome)
}
