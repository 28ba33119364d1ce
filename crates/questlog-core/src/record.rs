//! Record store abstraction.
//!
//! Every entity (character, session, message, inventory item, spell) is
//! persisted as a JSON payload in a named collection. Ownership between
//! collections drives cascading deletes, which are the store's
//! responsibility rather than the caller's.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// The keyed collections held by a record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Player characters.
    Characters,
    /// Game sessions, owned by a character.
    Sessions,
    /// Conversation log entries, owned by a session.
    Messages,
    /// Inventory items, owned by a character.
    Inventory,
    /// Learned spells, owned by a character.
    Spells,
}

impl Collection {
    /// Every collection, in a stable order.
    pub const ALL: [Self; 5] = [
        Self::Characters,
        Self::Sessions,
        Self::Messages,
        Self::Inventory,
        Self::Spells,
    ];

    /// Storage name of the collection.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::Sessions => "sessions",
            Self::Messages => "messages",
            Self::Inventory => "inventory",
            Self::Spells => "spells",
        }
    }

    /// Parses a storage name back into a collection.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Collections whose records are owned by records of this collection
    /// and must be deleted along with them.
    #[must_use]
    pub fn dependents(self) -> &'static [Self] {
        match self {
            Self::Characters => &[Self::Sessions, Self::Inventory, Self::Spells],
            Self::Sessions => &[Self::Messages],
            Self::Messages | Self::Inventory | Self::Spells => &[],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored representation of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// Collection the record belongs to.
    pub collection: Collection,
    /// Record identifier, unique within its collection.
    pub id: Uuid,
    /// Parent record for cascading deletes.
    pub owner_id: Option<Uuid>,
    /// Serialized entity.
    pub payload: serde_json::Value,
    /// Timestamp of the last write.
    pub updated_at: DateTime<Utc>,
}

impl StoredRecord {
    /// Serializes an entity into a record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the entity cannot be
    /// represented as JSON.
    pub fn encode<T: Serialize>(
        collection: Collection,
        id: Uuid,
        owner_id: Option<Uuid>,
        entity: &T,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let payload = serde_json::to_value(entity).map_err(|e| {
            DomainError::Infrastructure(format!("{collection} serialization failed: {e}"))
        })?;
        Ok(Self {
            collection,
            id,
            owner_id,
            payload,
            updated_at,
        })
    }

    /// Deserializes the payload into an entity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the payload does not match
    /// the entity shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        serde_json::from_value(self.payload.clone()).map_err(|e| {
            DomainError::Infrastructure(format!(
                "{} record {} is corrupted: {e}",
                self.collection, self.id
            ))
        })
    }
}

/// Decodes every record, skipping (and logging) the ones that fail.
///
/// List reads degrade gracefully: one corrupted record must not hide the
/// rest of a collection.
pub fn decode_all<T: DeserializeOwned>(records: &[StoredRecord]) -> Vec<T> {
    records
        .iter()
        .filter_map(|record| match record.decode() {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!(error = %e, "skipping corrupted record");
                None
            }
        })
        .collect()
}

/// Keyed storage for every entity type, injected wherever state is read or
/// written.
///
/// Records are returned in insertion order. Upserting an existing key
/// replaces its payload in place. Writes are last-write-wins per key.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load every record in a collection.
    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredRecord>, DomainError>;

    /// Load every record in a collection owned by `owner_id`.
    async fn get_by_owner(
        &self,
        collection: Collection,
        owner_id: Uuid,
    ) -> Result<Vec<StoredRecord>, DomainError>;

    /// Load a single record by identifier.
    async fn get(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredRecord>, DomainError>;

    /// Write a batch of records. Either every record is written or none is.
    async fn commit(&self, records: Vec<StoredRecord>) -> Result<(), DomainError>;

    /// Delete a record and, recursively, every record it owns.
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), DomainError>;

    /// Insert or replace a single record.
    async fn upsert(&self, record: StoredRecord) -> Result<(), DomainError> {
        self.commit(vec![record]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Lantern {
        name: String,
        lit: bool,
    }

    #[test]
    fn test_collection_names_round_trip() {
        for collection in Collection::ALL {
            assert_eq!(Collection::from_name(collection.as_str()), Some(collection));
        }
        assert_eq!(Collection::from_name("scrolls"), None);
    }

    #[test]
    fn test_characters_own_sessions_inventory_and_spells() {
        assert_eq!(
            Collection::Characters.dependents(),
            &[Collection::Sessions, Collection::Inventory, Collection::Spells]
        );
        assert_eq!(Collection::Sessions.dependents(), &[Collection::Messages]);
        assert!(Collection::Messages.dependents().is_empty());
    }

    #[test]
    fn test_encode_then_decode_entity() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let lantern = Lantern {
            name: "hooded lantern".into(),
            lit: true,
        };

        let record =
            StoredRecord::encode(Collection::Inventory, Uuid::new_v4(), None, &lantern, now)
                .unwrap();

        assert_eq!(record.payload["name"], "hooded lantern");
        assert_eq!(record.decode::<Lantern>().unwrap(), lantern);
    }

    #[test]
    fn test_decode_all_skips_corrupted_records() {
        let now = Utc::now();
        let good = StoredRecord::encode(
            Collection::Inventory,
            Uuid::new_v4(),
            None,
            &Lantern {
                name: "brass lantern".into(),
                lit: false,
            },
            now,
        )
        .unwrap();
        let bad = StoredRecord {
            payload: serde_json::json!("not a lantern"),
            ..good.clone()
        };

        let lanterns: Vec<Lantern> = decode_all(&[bad, good]);

        assert_eq!(lanterns.len(), 1);
        assert_eq!(lanterns[0].name, "brass lantern");
    }

    #[test]
    fn test_decode_corrupted_payload_is_infrastructure_error() {
        let record = StoredRecord {
            collection: Collection::Spells,
            id: Uuid::new_v4(),
            owner_id: None,
            payload: serde_json::json!({ "name": 12 }),
            updated_at: Utc::now(),
        };

        match record.decode::<Lantern>().unwrap_err() {
            DomainError::Infrastructure(msg) => assert!(msg.contains("spells record")),
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }
}
