//! Command handlers for the Character Management context.
//!
//! Each handler loads what it needs from the record store, runs the domain
//! logic and writes the result back.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use questlog_core::clock::Clock;
use questlog_core::error::DomainError;
use questlog_core::record::{Collection, RecordStore, StoredRecord};
use questlog_core::rng::DeterministicRng;
use questlog_rules::domain::attack::resolve_attack;
use questlog_rules::domain::bestiary::enemy_armor_class;
use questlog_rules::domain::effects::EffectKind;
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::Character;
use crate::domain::commands::{
    AddItem, CastSpell, CreateCharacter, DeleteCharacter, ForgetSpell, LearnSpell, RemoveItem,
};
use crate::domain::inventory::InventoryItem;
use crate::domain::spells::{CastResult, SlotType, Spell};

/// Encodes a character for the store.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if serialization fails.
pub fn character_record(
    character: &Character,
    updated_at: DateTime<Utc>,
) -> Result<StoredRecord, DomainError> {
    StoredRecord::encode(
        Collection::Characters,
        character.id,
        None,
        character,
        updated_at,
    )
}

/// Loads a character.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no such character exists.
/// Returns `DomainError::Infrastructure` if the store fails or the record is
/// corrupted.
pub async fn load_character(
    character_id: Uuid,
    store: &dyn RecordStore,
) -> Result<Character, DomainError> {
    store
        .get(Collection::Characters, character_id)
        .await?
        .ok_or_else(|| DomainError::not_found(Collection::Characters, character_id))?
        .decode()
}

async fn load_spell(
    character_id: Uuid,
    spell_id: Uuid,
    store: &dyn RecordStore,
) -> Result<Spell, DomainError> {
    let spell: Spell = store
        .get(Collection::Spells, spell_id)
        .await?
        .ok_or_else(|| DomainError::not_found(Collection::Spells, spell_id))?
        .decode()?;
    if spell.character_id != character_id {
        return Err(DomainError::not_found(Collection::Spells, spell_id));
    }
    Ok(spell)
}

/// Handles the `CreateCharacter` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the name is blank or too long.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn handle_create_character(
    command: &CreateCharacter,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<Character, DomainError> {
    let character = Character::create(
        Uuid::new_v4(),
        &command.name,
        command.class,
        command.backstory.clone(),
        clock,
    )?;

    store
        .upsert(character_record(&character, clock.now())?)
        .await?;

    info!(
        correlation_id = %command.correlation_id,
        character_id = %character.id,
        class = %character.class,
        "character created"
    );

    Ok(character)
}

/// Handles the `DeleteCharacter` command. Sessions, messages, inventory and
/// spells go with the character.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no such character exists.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn handle_delete_character(
    command: &DeleteCharacter,
    store: &dyn RecordStore,
) -> Result<(), DomainError> {
    if store
        .get(Collection::Characters, command.character_id)
        .await?
        .is_none()
    {
        return Err(DomainError::not_found(
            Collection::Characters,
            command.character_id,
        ));
    }

    store
        .delete(Collection::Characters, command.character_id)
        .await?;

    info!(
        correlation_id = %command.correlation_id,
        character_id = %command.character_id,
        "character deleted"
    );
    Ok(())
}

/// Handles the `AddItem` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the name is blank or the quantity
/// is zero.
/// Returns `DomainError::NotFound` if the character does not exist.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn handle_add_item(
    command: &AddItem,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<InventoryItem, DomainError> {
    let item_name = command.item_name.trim();
    if item_name.is_empty() {
        return Err(DomainError::Validation("item name must not be empty".into()));
    }
    if command.quantity == 0 {
        return Err(DomainError::Validation(
            "item quantity must be at least 1".into(),
        ));
    }
    load_character(command.character_id, store).await?;

    let now = clock.now();
    let item = InventoryItem {
        id: Uuid::new_v4(),
        character_id: command.character_id,
        item_name: item_name.to_owned(),
        item_type: command.item_type,
        quantity: command.quantity,
        properties: command.properties.clone(),
        added_at: now,
    };
    store
        .upsert(StoredRecord::encode(
            Collection::Inventory,
            item.id,
            Some(item.character_id),
            &item,
            now,
        )?)
        .await?;

    info!(
        correlation_id = %command.correlation_id,
        character_id = %command.character_id,
        item_id = %item.id,
        "item added"
    );
    Ok(item)
}

/// Handles the `RemoveItem` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the item does not exist or belongs to
/// another character.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn handle_remove_item(
    command: &RemoveItem,
    store: &dyn RecordStore,
) -> Result<(), DomainError> {
    let owned = store
        .get(Collection::Inventory, command.item_id)
        .await?
        .is_some_and(|record| record.owner_id == Some(command.character_id));
    if !owned {
        return Err(DomainError::not_found(
            Collection::Inventory,
            command.item_id,
        ));
    }

    store
        .delete(Collection::Inventory, command.item_id)
        .await?;

    info!(
        correlation_id = %command.correlation_id,
        character_id = %command.character_id,
        item_id = %command.item_id,
        "item removed"
    );
    Ok(())
}

/// Handles the `LearnSpell` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the spell is not in the class
/// catalog or is already known.
/// Returns `DomainError::NotFound` if the character does not exist.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn handle_learn_spell(
    command: &LearnSpell,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<Spell, DomainError> {
    let character = load_character(command.character_id, store).await?;
    let Some(entry) = character.class.catalog_spell(&command.spell_name) else {
        return Err(DomainError::Validation(format!(
            "{} cannot learn {}",
            character.class,
            command.spell_name.trim()
        )));
    };

    let known = store
        .get_by_owner(Collection::Spells, character.id)
        .await?;
    let known: Vec<Spell> = questlog_core::record::decode_all(&known);
    if known.iter().any(|spell| spell.spell_name == entry.name) {
        return Err(DomainError::Validation(format!(
            "{} already knows {}",
            character.name, entry.name
        )));
    }

    let now = clock.now();
    let spell = Spell {
        id: Uuid::new_v4(),
        character_id: character.id,
        spell_name: entry.name.to_owned(),
        slot_type: SlotType::Ability,
        damage_dice: Some(entry.damage.to_owned()),
        description: entry.description.to_owned(),
        learned_at: now,
    };
    store
        .upsert(StoredRecord::encode(
            Collection::Spells,
            spell.id,
            Some(character.id),
            &spell,
            now,
        )?)
        .await?;

    info!(
        correlation_id = %command.correlation_id,
        character_id = %character.id,
        spell = %spell.spell_name,
        "spell learned"
    );
    Ok(spell)
}

/// Handles the `ForgetSpell` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the spell does not exist or belongs to
/// another character.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn handle_forget_spell(
    command: &ForgetSpell,
    store: &dyn RecordStore,
) -> Result<(), DomainError> {
    load_spell(command.character_id, command.spell_id, store).await?;
    store.delete(Collection::Spells, command.spell_id).await?;

    info!(
        correlation_id = %command.correlation_id,
        character_id = %command.character_id,
        spell_id = %command.spell_id,
        "spell forgotten"
    );
    Ok(())
}

/// Handles the `CastSpell` command.
///
/// Healing spells restore the caster's own hit points and are persisted.
/// Damaging spells are resolved as an attack with the caster's attack bonus
/// against the target's armor class. Spells without dice do nothing.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the character or spell does not exist.
/// Returns `DomainError::Infrastructure` if the RNG mutex is poisoned or the
/// store fails.
pub async fn handle_cast_spell(
    command: &CastSpell,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    store: &dyn RecordStore,
) -> Result<CastResult, DomainError> {
    let mut character = load_character(command.character_id, store).await?;
    let spell = load_spell(character.id, command.spell_id, store).await?;
    let effect = spell.effect();

    let result = {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        if effect.is_none() {
            CastResult::NoEffect
        } else {
            match effect.kind {
                EffectKind::Heal => {
                    let roll = effect.evaluate(&mut *rng_guard);
                    let restored = character.heal(roll.amount);
                    CastResult::Healed {
                        roll,
                        restored,
                        current_hp: character.current_hp,
                    }
                }
                EffectKind::Damage => {
                    let armor_class =
                        enemy_armor_class(command.target.as_deref().unwrap_or_default());
                    CastResult::Attack {
                        outcome: resolve_attack(
                            character.attack_bonus(),
                            armor_class,
                            &effect.magnitude.to_string(),
                            &mut *rng_guard,
                        ),
                    }
                }
            }
        }
    };

    if matches!(result, CastResult::Healed { .. }) {
        store
            .upsert(character_record(&character, clock.now())?)
            .await?;
    }

    info!(
        correlation_id = %command.correlation_id,
        character_id = %character.id,
        spell = %spell.spell_name,
        "spell cast"
    );
    Ok(result)
}
