//! Per-session turn serialization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use questlog_core::error::DomainError;
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

/// One async lock per session. A turn holds its session's lock from the
/// first read until the commit, so the turn counter and the message log
/// advance together.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>,
}

impl SessionLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other turn is running on `session_id`. The session
    /// stays locked until the returned guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock table is poisoned.
    pub async fn acquire(&self, session_id: Uuid) -> Result<OwnedMutexGuard<()>, DomainError> {
        let lock = {
            let mut locks = self.locks.lock().map_err(|e| {
                DomainError::Infrastructure(format!("session lock table poisoned: {e}"))
            })?;
            // Entries only the table still references are idle.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(session_id).or_default())
        };
        Ok(lock.lock_owned().await)
    }

    /// Number of sessions with a turn running or waiting.
    #[must_use]
    pub fn active(&self) -> usize {
        self.locks.lock().map_or(0, |locks| {
            locks
                .values()
                .filter(|lock| Arc::strong_count(lock) > 1)
                .count()
        })
    }
}
