//! Query handlers for the Session & Progress context.

use questlog_core::error::DomainError;
use questlog_core::record::{Collection, RecordStore, decode_all};
use uuid::Uuid;

use crate::application::command_handlers::load_session;
use crate::domain::aggregates::GameSession;
use crate::domain::messages::GameMessage;

/// Retrieves a session by ID.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no such session exists.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn get_session_by_id(
    session_id: Uuid,
    store: &dyn RecordStore,
) -> Result<GameSession, DomainError> {
    load_session(session_id, store).await
}

/// Lists a character's sessions, oldest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn list_sessions_for_character(
    character_id: Uuid,
    store: &dyn RecordStore,
) -> Result<Vec<GameSession>, DomainError> {
    let records = store
        .get_by_owner(Collection::Sessions, character_id)
        .await?;
    Ok(decode_all(&records))
}

/// Lists every session, oldest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn list_sessions(store: &dyn RecordStore) -> Result<Vec<GameSession>, DomainError> {
    let records = store.get_all(Collection::Sessions).await?;
    Ok(decode_all(&records))
}

/// The full log of a session in the order it was written.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the session does not exist.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn list_messages(
    session_id: Uuid,
    store: &dyn RecordStore,
) -> Result<Vec<GameMessage>, DomainError> {
    load_session(session_id, store).await?;
    let records = store
        .get_by_owner(Collection::Messages, session_id)
        .await?;
    Ok(decode_all(&records))
}

/// The last `count` messages of a session, oldest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn recent_messages(
    session_id: Uuid,
    count: usize,
    store: &dyn RecordStore,
) -> Result<Vec<GameMessage>, DomainError> {
    let records = store
        .get_by_owner(Collection::Messages, session_id)
        .await?;
    let mut messages: Vec<GameMessage> = decode_all(&records);
    let skip = messages.len().saturating_sub(count);
    messages.drain(..skip);
    Ok(messages)
}
