//! Query handlers for the Character Management context.
//!
//! Read-only views over stored characters and the records they own.

use chrono::{DateTime, Utc};
use questlog_core::error::DomainError;
use questlog_core::record::{Collection, RecordStore, decode_all};
use questlog_rules::domain::abilities::CharacterStats;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers::load_character;
use crate::domain::aggregates::Character;
use crate::domain::class::CharacterClass;
use crate::domain::inventory::InventoryItem;
use crate::domain::progression::xp_for_next_level;
use crate::domain::spells::Spell;

/// Read-only view of a character sheet with derived numbers filled in.
#[derive(Debug, Serialize)]
pub struct CharacterView {
    /// The character identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Class.
    pub class: CharacterClass,
    /// Current level.
    pub level: u32,
    /// Total experience.
    pub xp: u32,
    /// XP needed for the next level; absent at the cap.
    pub xp_for_next_level: Option<u32>,
    /// Hit point ceiling.
    pub max_hp: i32,
    /// Current hit points.
    pub current_hp: i32,
    /// Ability scores.
    pub stats: CharacterStats,
    /// To-hit bonus with the class's attack ability.
    pub attack_bonus: i32,
    /// Flat class defense.
    pub defense: i32,
    /// Signature class abilities.
    pub abilities: Vec<&'static str>,
    /// Flavor text.
    pub backstory: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Character> for CharacterView {
    fn from(character: Character) -> Self {
        let profile = character.class.profile();
        Self {
            id: character.id,
            attack_bonus: character.attack_bonus(),
            xp_for_next_level: xp_for_next_level(character.level),
            defense: profile.defense,
            abilities: profile.abilities.to_vec(),
            name: character.name,
            class: character.class,
            level: character.level,
            xp: character.xp,
            max_hp: character.max_hp,
            current_hp: character.current_hp,
            stats: character.stats,
            backstory: character.backstory,
            created_at: character.created_at,
        }
    }
}

/// Retrieves a character by ID.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no such character exists.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn get_character_by_id(
    character_id: Uuid,
    store: &dyn RecordStore,
) -> Result<CharacterView, DomainError> {
    load_character(character_id, store)
        .await
        .map(CharacterView::from)
}

/// Lists every character, oldest first. Corrupted records are skipped.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn list_characters(store: &dyn RecordStore) -> Result<Vec<CharacterView>, DomainError> {
    let records = store.get_all(Collection::Characters).await?;
    Ok(decode_all::<Character>(&records)
        .into_iter()
        .map(CharacterView::from)
        .collect())
}

/// Lists a character's inventory in the order items were added.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the character does not exist.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn list_inventory(
    character_id: Uuid,
    store: &dyn RecordStore,
) -> Result<Vec<InventoryItem>, DomainError> {
    load_character(character_id, store).await?;
    let records = store
        .get_by_owner(Collection::Inventory, character_id)
        .await?;
    Ok(decode_all(&records))
}

/// Lists a character's learned spells in the order they were learned.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the character does not exist.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn list_spells(
    character_id: Uuid,
    store: &dyn RecordStore,
) -> Result<Vec<Spell>, DomainError> {
    load_character(character_id, store).await?;
    let records = store.get_by_owner(Collection::Spells, character_id).await?;
    Ok(decode_all(&records))
}
