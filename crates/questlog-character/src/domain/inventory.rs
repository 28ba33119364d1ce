//! Items a character carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Broad item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Swords, bows, staves.
    Weapon,
    /// Worn protection.
    Armor,
    /// Used up on use.
    #[default]
    Consumable,
    /// Plot items.
    QuestItem,
}

/// A stack of items in a character's pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryItem {
    /// Item identifier.
    pub id: Uuid,
    /// Owning character.
    pub character_id: Uuid,
    /// Display name.
    pub item_name: String,
    /// Category.
    pub item_type: ItemType,
    /// Stack size, at least 1.
    pub quantity: u32,
    /// Free-form attributes such as damage or weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
    /// When the item was picked up.
    pub added_at: DateTime<Utc>,
}

impl Default for InventoryItem {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            character_id: Uuid::nil(),
            item_name: String::new(),
            item_type: ItemType::default(),
            quantity: 1,
            properties: None,
            added_at: DateTime::<Utc>::default(),
        }
    }
}
