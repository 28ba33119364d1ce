//! Commands for the Narrative Orchestration context.

use uuid::Uuid;

use super::prompt::Personality;

/// Command to play one turn of a stored session.
#[derive(Debug, Clone)]
pub struct SubmitAction {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session being played.
    pub session_id: Uuid,
    /// What the player typed.
    pub player_action: String,
    /// Narrator style for this turn.
    pub personality: Personality,
}

/// Command to have the narrator write a character's backstory.
#[derive(Debug, Clone)]
pub struct GenerateBackstory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
}
