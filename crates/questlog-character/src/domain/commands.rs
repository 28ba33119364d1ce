//! Commands for the Character Management context.

use uuid::Uuid;

use super::class::CharacterClass;
use super::inventory::ItemType;

/// Command to create a new character.
#[derive(Debug, Clone)]
pub struct CreateCharacter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character's name.
    pub name: String,
    /// The chosen class.
    pub class: CharacterClass,
    /// Optional player-written backstory.
    pub backstory: Option<String>,
}

/// Command to delete a character and everything it owns.
#[derive(Debug, Clone)]
pub struct DeleteCharacter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
}

/// Command to put an item into a character's pack.
#[derive(Debug, Clone)]
pub struct AddItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
    /// The item name.
    pub item_name: String,
    /// The item category.
    pub item_type: ItemType,
    /// Stack size.
    pub quantity: u32,
    /// Free-form attributes.
    pub properties: Option<serde_json::Value>,
}

/// Command to drop an item.
#[derive(Debug, Clone)]
pub struct RemoveItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
    /// The item identifier.
    pub item_id: Uuid,
}

/// Command to learn a spell from the class catalog.
#[derive(Debug, Clone)]
pub struct LearnSpell {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
    /// Name of a spell in the class catalog.
    pub spell_name: String,
}

/// Command to forget a learned spell.
#[derive(Debug, Clone)]
pub struct ForgetSpell {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
    /// The spell identifier.
    pub spell_id: Uuid,
}

/// Command to cast a learned spell.
#[derive(Debug, Clone)]
pub struct CastSpell {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The caster.
    pub character_id: Uuid,
    /// The spell identifier.
    pub spell_id: Uuid,
    /// Creature name for damaging spells; decides the armor class.
    pub target: Option<String>,
}
