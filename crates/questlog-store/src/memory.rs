//! In-memory implementation of the `RecordStore` trait.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use questlog_core::error::DomainError;
use questlog_core::record::{Collection, RecordStore, StoredRecord};

/// Process-local record store. Records live in a single insertion-ordered
/// list guarded by a lock, which makes every batch trivially atomic.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<StoredRecord>>,
}

impl MemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across every collection.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.len())
    }

    /// Returns `true` when the store holds nothing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<StoredRecord>>, DomainError> {
        self.records
            .read()
            .map_err(|e| DomainError::Infrastructure(format!("record store lock poisoned: {e}")))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<StoredRecord>>, DomainError> {
        self.records
            .write()
            .map_err(|e| DomainError::Infrastructure(format!("record store lock poisoned: {e}")))
    }
}

/// Walks collection ownership from `(collection, id)` and returns every key
/// that must go, the root included.
fn cascade_keys(
    records: &[StoredRecord],
    collection: Collection,
    id: Uuid,
) -> HashSet<(Collection, Uuid)> {
    let mut doomed = HashSet::new();
    let mut pending = vec![(collection, id)];

    while let Some((parent_collection, parent_id)) = pending.pop() {
        if !doomed.insert((parent_collection, parent_id)) {
            continue;
        }
        for &child_collection in parent_collection.dependents() {
            pending.extend(
                records
                    .iter()
                    .filter(|r| r.collection == child_collection && r.owner_id == Some(parent_id))
                    .map(|r| (r.collection, r.id)),
            );
        }
    }

    doomed
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredRecord>, DomainError> {
        Ok(self
            .read()?
            .iter()
            .filter(|r| r.collection == collection)
            .cloned()
            .collect())
    }

    async fn get_by_owner(
        &self,
        collection: Collection,
        owner_id: Uuid,
    ) -> Result<Vec<StoredRecord>, DomainError> {
        Ok(self
            .read()?
            .iter()
            .filter(|r| r.collection == collection && r.owner_id == Some(owner_id))
            .cloned()
            .collect())
    }

    async fn get(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredRecord>, DomainError> {
        Ok(self
            .read()?
            .iter()
            .find(|r| r.collection == collection && r.id == id)
            .cloned())
    }

    async fn commit(&self, records: Vec<StoredRecord>) -> Result<(), DomainError> {
        let mut stored = self.write()?;
        for record in records {
            match stored
                .iter_mut()
                .find(|r| r.collection == record.collection && r.id == record.id)
            {
                Some(existing) => *existing = record,
                None => stored.push(record),
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), DomainError> {
        let mut stored = self.write()?;
        let doomed = cascade_keys(&stored, collection, id);
        stored.retain(|r| !doomed.contains(&(r.collection, r.id)));
        tracing::debug!(%collection, %id, removed = doomed.len(), "records deleted");
        Ok(())
    }
}
