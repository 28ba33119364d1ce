//! Command handlers for the Session & Progress context.

use chrono::{DateTime, Utc};
use questlog_character::application::command_handlers::load_character;
use questlog_core::clock::Clock;
use questlog_core::error::DomainError;
use questlog_core::record::{Collection, RecordStore, StoredRecord};
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::GameSession;
use crate::domain::commands::{EndSession, StartSession};
use crate::domain::messages::GameMessage;

/// Encodes a session for the store. Sessions are owned by their character.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if serialization fails.
pub fn session_record(
    session: &GameSession,
    updated_at: DateTime<Utc>,
) -> Result<StoredRecord, DomainError> {
    StoredRecord::encode(
        Collection::Sessions,
        session.id,
        Some(session.character_id),
        session,
        updated_at,
    )
}

/// Encodes a log message for the store. Messages are owned by their session.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if serialization fails.
pub fn message_record(message: &GameMessage) -> Result<StoredRecord, DomainError> {
    StoredRecord::encode(
        Collection::Messages,
        message.id,
        Some(message.session_id),
        message,
        message.created_at,
    )
}

/// Loads a session.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no such session exists.
/// Returns `DomainError::Infrastructure` if the store fails or the record is
/// corrupted.
pub async fn load_session(
    session_id: Uuid,
    store: &dyn RecordStore,
) -> Result<GameSession, DomainError> {
    store
        .get(Collection::Sessions, session_id)
        .await?
        .ok_or_else(|| DomainError::not_found(Collection::Sessions, session_id))?
        .decode()
}

/// Handles the `StartSession` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the character does not exist.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn handle_start_session(
    command: &StartSession,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<GameSession, DomainError> {
    let character = load_character(command.character_id, store).await?;
    let session = GameSession::start(
        Uuid::new_v4(),
        character.id,
        command.ai_provider.unwrap_or_default(),
        clock,
    );

    store.upsert(session_record(&session, clock.now())?).await?;

    info!(
        correlation_id = %command.correlation_id,
        session_id = %session.id,
        character_id = %character.id,
        backend = %session.ai_provider,
        "session started"
    );
    Ok(session)
}

/// Handles the `EndSession` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the session does not exist.
/// Returns `DomainError::Validation` if it already ended.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn handle_end_session(
    command: &EndSession,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<GameSession, DomainError> {
    let mut session = load_session(command.session_id, store).await?;
    session.end(clock)?;
    store.upsert(session_record(&session, clock.now())?).await?;

    info!(
        correlation_id = %command.correlation_id,
        session_id = %session.id,
        turns = session.turn_count,
        "session ended"
    );
    Ok(session)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use questlog_character::application::command_handlers::character_record;
    use questlog_character::domain::aggregates::Character;
    use questlog_character::domain::class::CharacterClass;
    use questlog_store::MemoryRecordStore;
    use questlog_test_support::{EmptyRecordStore, FixedClock};

    use super::*;
    use crate::domain::backend::NarrationBackend;

    async fn seed_character(store: &MemoryRecordStore) -> Character {
        let character = Character::create(
            Uuid::new_v4(),
            "Nim",
            CharacterClass::Rogue,
            None,
            &FixedClock::standard(),
        )
        .unwrap();
        store
            .upsert(character_record(&character, Utc::now()).unwrap())
            .await
            .unwrap();
        character
    }

    #[tokio::test]
    async fn test_start_session_defaults_to_gemini() {
        // Arrange
        let store = MemoryRecordStore::new();
        let character = seed_character(&store).await;
        let command = StartSession {
            correlation_id: Uuid::new_v4(),
            character_id: character.id,
            ai_provider: None,
        };

        // Act
        let session = handle_start_session(&command, &FixedClock::standard(), &store)
            .await
            .unwrap();

        // Assert
        assert_eq!(session.ai_provider, NarrationBackend::Gemini);
        let stored = store
            .get(Collection::Sessions, session.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.owner_id, Some(character.id));
        assert_eq!(load_session(session.id, &store).await.unwrap(), session);
    }

    #[tokio::test]
    async fn test_start_session_requires_character() {
        let command = StartSession {
            correlation_id: Uuid::new_v4(),
            character_id: Uuid::new_v4(),
            ai_provider: Some(NarrationBackend::Glm),
        };

        let result =
            handle_start_session(&command, &FixedClock::standard(), &EmptyRecordStore).await;

        match result.unwrap_err() {
            DomainError::NotFound { collection, .. } => {
                assert_eq!(collection, Collection::Characters);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_end_session_marks_inactive() {
        let store = MemoryRecordStore::new();
        let character = seed_character(&store).await;
        let clock = FixedClock::standard();
        let start = StartSession {
            correlation_id: Uuid::new_v4(),
            character_id: character.id,
            ai_provider: Some(NarrationBackend::Glm),
        };
        let session = handle_start_session(&start, &clock, &store).await.unwrap();
        let end = EndSession {
            correlation_id: Uuid::new_v4(),
            session_id: session.id,
        };

        let ended = handle_end_session(&end, &clock, &store).await.unwrap();

        assert!(!ended.is_active);
        assert!(!load_session(session.id, &store).await.unwrap().is_active);
        assert!(matches!(
            handle_end_session(&end, &clock, &store).await,
            Err(DomainError::Validation(_))
        ));
    }
}
