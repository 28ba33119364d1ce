//! SQLite implementation of the `RecordStore` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::warn;
use uuid::Uuid;

use questlog_core::error::DomainError;
use questlog_core::record::{Collection, RecordStore, StoredRecord};

use crate::schema::CREATE_RECORDS_TABLE;

type RecordRow = (String, String, Option<String>, String, String);

const SELECT_COLUMNS: &str = "SELECT collection, id, owner_id, payload, updated_at FROM records";

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("database error: {e}"))
}

fn corrupted(what: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Infrastructure(format!("corrupted {what} column: {e}"))
}

fn from_row(row: RecordRow) -> Result<StoredRecord, DomainError> {
    let (collection, id, owner_id, payload, updated_at) = row;
    let collection = Collection::from_name(&collection)
        .ok_or_else(|| corrupted("collection", format!("unknown collection {collection}")))?;
    let id = Uuid::parse_str(&id).map_err(|e| corrupted("id", e))?;
    let owner_id = owner_id
        .map(|owner| Uuid::parse_str(&owner))
        .transpose()
        .map_err(|e| corrupted("owner_id", e))?;
    let payload = serde_json::from_str(&payload).map_err(|e| corrupted("payload", e))?;
    let updated_at = DateTime::parse_from_rfc3339(&updated_at)
        .map_err(|e| corrupted("updated_at", e))?
        .with_timezone(&Utc);

    Ok(StoredRecord {
        collection,
        id,
        owner_id,
        payload,
        updated_at,
    })
}

/// Decodes list rows, skipping any that cannot be read so one damaged row
/// does not hide the rest of the collection.
fn decode_rows(collection: Collection, rows: Vec<RecordRow>) -> Vec<StoredRecord> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.1.clone();
            from_row(row)
                .map_err(|e| warn!(%collection, %id, error = %e, "skipping unreadable row"))
                .ok()
        })
        .collect()
}

/// SQLite-backed record store.
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Wraps an existing pool. Call [`SqliteRecordStore::migrate`] before use.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database at `url` and applies the
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the database cannot be
    /// opened or migrated.
    pub async fn connect(url: &str) -> Result<Self, DomainError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(db_error)?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Opens a private in-memory database. The pool is pinned to a single
    /// connection that never expires, since each SQLite memory connection
    /// is its own database.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the database cannot be
    /// created.
    pub async fn in_memory() -> Result<Self, DomainError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(db_error)?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Creates the records table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a schema statement fails.
    pub async fn migrate(&self) -> Result<(), DomainError> {
        for statement in CREATE_RECORDS_TABLE {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(db_error)?;
        }
        Ok(())
    }

    async fn upsert_in(
        tx: &mut Transaction<'_, Sqlite>,
        record: &StoredRecord,
    ) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&record.payload).map_err(|e| {
            DomainError::Infrastructure(format!("payload serialization failed: {e}"))
        })?;

        sqlx::query(
            "INSERT INTO records (collection, id, owner_id, payload, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT (collection, id) DO UPDATE SET \
                 owner_id = excluded.owner_id, \
                 payload = excluded.payload, \
                 updated_at = excluded.updated_at",
        )
        .bind(record.collection.as_str())
        .bind(record.id.to_string())
        .bind(record.owner_id.map(|owner| owner.to_string()))
        .bind(payload)
        .bind(record.updated_at.to_rfc3339())
        .execute(&mut **tx)
        .await
        .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredRecord>, DomainError> {
        let rows: Vec<RecordRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE collection = ? ORDER BY seq"))
                .bind(collection.as_str())
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;
        Ok(decode_rows(collection, rows))
    }

    async fn get_by_owner(
        &self,
        collection: Collection,
        owner_id: Uuid,
    ) -> Result<Vec<StoredRecord>, DomainError> {
        let rows: Vec<RecordRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE collection = ? AND owner_id = ? ORDER BY seq"
        ))
        .bind(collection.as_str())
        .bind(owner_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(decode_rows(collection, rows))
    }

    async fn get(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredRecord>, DomainError> {
        let row: Option<RecordRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE collection = ? AND id = ?"))
                .bind(collection.as_str())
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;
        row.map(from_row).transpose()
    }

    async fn commit(&self, records: Vec<StoredRecord>) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        for record in &records {
            Self::upsert_in(&mut tx, record).await?;
        }
        tx.commit().await.map_err(db_error)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let mut pending = vec![(collection, id)];
        let mut removed = 0_usize;

        while let Some((parent_collection, parent_id)) = pending.pop() {
            for &child_collection in parent_collection.dependents() {
                let children: Vec<(String,)> = sqlx::query_as(
                    "SELECT id FROM records WHERE collection = ? AND owner_id = ?",
                )
                .bind(child_collection.as_str())
                .bind(parent_id.to_string())
                .fetch_all(&mut *tx)
                .await
                .map_err(db_error)?;

                for (child_id,) in children {
                    let child_id = Uuid::parse_str(&child_id).map_err(|e| corrupted("id", e))?;
                    pending.push((child_collection, child_id));
                }
            }

            let result = sqlx::query("DELETE FROM records WHERE collection = ? AND id = ?")
                .bind(parent_collection.as_str())
                .bind(parent_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
            removed += usize::try_from(result.rows_affected()).unwrap_or(usize::MAX);
        }

        tx.commit().await.map_err(db_error)?;
        tracing::debug!(%collection, %id, removed, "records deleted");
        Ok(())
    }
}
