//! Commands for the Session & Progress context.

use uuid::Uuid;

use super::backend::NarrationBackend;

/// Command to start a new session for a character.
#[derive(Debug, Clone)]
pub struct StartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character who will play.
    pub character_id: Uuid,
    /// Narration backend; Gemini when absent.
    pub ai_provider: Option<NarrationBackend>,
}

/// Command to end a session.
#[derive(Debug, Clone)]
pub struct EndSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
}
