//! Aggregate roots for the Session & Progress context.

use chrono::{DateTime, Utc};
use questlog_core::clock::Clock;
use questlog_core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::backend::NarrationBackend;

/// Where every new adventure begins.
pub const STARTING_LOCATION: &str = "The Rusty Dragon Tavern";

/// Shared state of the game world for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldState {
    /// Current location name.
    pub location: String,
    /// Time of day, e.g. `evening`.
    pub time_of_day: String,
    /// Season, e.g. `autumn`.
    pub season: String,
    /// Notable events so far.
    pub events: Vec<String>,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            location: STARTING_LOCATION.to_owned(),
            time_of_day: "evening".to_owned(),
            season: "autumn".to_owned(),
            events: Vec::new(),
        }
    }
}

/// The aggregate root for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSession {
    /// Aggregate identifier.
    pub id: Uuid,
    /// The character playing this session.
    pub character_id: Uuid,
    /// Narration backend for every turn of this session.
    pub ai_provider: NarrationBackend,
    /// When play started.
    pub started_at: DateTime<Utc>,
    /// When the last turn was taken.
    pub last_action_at: DateTime<Utc>,
    /// World state.
    pub world_state: WorldState,
    /// Completed turns.
    pub turn_count: u32,
    /// `false` once the session is ended.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            character_id: Uuid::nil(),
            ai_provider: NarrationBackend::default(),
            started_at: DateTime::<Utc>::default(),
            last_action_at: DateTime::<Utc>::default(),
            world_state: WorldState::default(),
            turn_count: 0,
            is_active: true,
            created_at: DateTime::<Utc>::default(),
        }
    }
}

impl GameSession {
    /// Starts a fresh session in the default world state.
    #[must_use]
    pub fn start(
        id: Uuid,
        character_id: Uuid,
        ai_provider: NarrationBackend,
        clock: &dyn Clock,
    ) -> Self {
        let now = clock.now();
        Self {
            id,
            character_id,
            ai_provider,
            started_at: now,
            last_action_at: now,
            world_state: WorldState::default(),
            turn_count: 0,
            is_active: true,
            created_at: now,
        }
    }

    /// Number the next turn will carry.
    #[must_use]
    pub fn next_turn(&self) -> u32 {
        self.turn_count.saturating_add(1)
    }

    /// Records a completed turn.
    pub fn record_turn(&mut self, turn: u32, location: String, at: DateTime<Utc>) {
        self.turn_count = turn;
        self.world_state.location = location;
        self.last_action_at = at;
    }

    /// Ends the session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the session already ended.
    pub fn end(&mut self, clock: &dyn Clock) -> Result<(), DomainError> {
        if !self.is_active {
            return Err(DomainError::Validation(format!(
                "session {} has already ended",
                self.id
            )));
        }
        self.is_active = false;
        self.last_action_at = clock.now();
        Ok(())
    }
}
