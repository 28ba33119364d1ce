//! Test stores: `RecordStore` implementations for failure and empty paths.

use async_trait::async_trait;
use questlog_core::error::DomainError;
use questlog_core::record::{Collection, RecordStore, StoredRecord};
use uuid::Uuid;

/// A store that holds nothing and silently accepts writes. Useful for
/// testing "not found" scenarios.
#[derive(Debug)]
pub struct EmptyRecordStore;

#[async_trait]
impl RecordStore for EmptyRecordStore {
    async fn get_all(&self, _collection: Collection) -> Result<Vec<StoredRecord>, DomainError> {
        Ok(vec![])
    }

    async fn get_by_owner(
        &self,
        _collection: Collection,
        _owner_id: Uuid,
    ) -> Result<Vec<StoredRecord>, DomainError> {
        Ok(vec![])
    }

    async fn get(
        &self,
        _collection: Collection,
        _id: Uuid,
    ) -> Result<Option<StoredRecord>, DomainError> {
        Ok(None)
    }

    async fn commit(&self, _records: Vec<StoredRecord>) -> Result<(), DomainError> {
        Ok(())
    }

    async fn delete(&self, _collection: Collection, _id: Uuid) -> Result<(), DomainError> {
        Ok(())
    }
}

/// A store that always returns an infrastructure error. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingRecordStore;

fn unavailable() -> DomainError {
    DomainError::Infrastructure("storage unavailable".into())
}

#[async_trait]
impl RecordStore for FailingRecordStore {
    async fn get_all(&self, _collection: Collection) -> Result<Vec<StoredRecord>, DomainError> {
        Err(unavailable())
    }

    async fn get_by_owner(
        &self,
        _collection: Collection,
        _owner_id: Uuid,
    ) -> Result<Vec<StoredRecord>, DomainError> {
        Err(unavailable())
    }

    async fn get(
        &self,
        _collection: Collection,
        _id: Uuid,
    ) -> Result<Option<StoredRecord>, DomainError> {
        Err(unavailable())
    }

    async fn commit(&self, _records: Vec<StoredRecord>) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn delete(&self, _collection: Collection, _id: Uuid) -> Result<(), DomainError> {
        Err(unavailable())
    }
}

/// Wraps a store so reads pass through and every write fails. Useful for
/// checking that a failed write leaves earlier state untouched.
#[derive(Debug)]
pub struct ReadOnlyRecordStore<S>(pub S);

#[async_trait]
impl<S: RecordStore> RecordStore for ReadOnlyRecordStore<S> {
    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredRecord>, DomainError> {
        self.0.get_all(collection).await
    }

    async fn get_by_owner(
        &self,
        collection: Collection,
        owner_id: Uuid,
    ) -> Result<Vec<StoredRecord>, DomainError> {
        self.0.get_by_owner(collection, owner_id).await
    }

    async fn get(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredRecord>, DomainError> {
        self.0.get(collection, id).await
    }

    async fn commit(&self, _records: Vec<StoredRecord>) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn delete(&self, _collection: Collection, _id: Uuid) -> Result<(), DomainError> {
        Err(unavailable())
    }
}
