//! The append-only conversation log of a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Typed by the player.
    #[default]
    PlayerAction,
    /// Narrated by the DM.
    DmResponse,
}

/// One entry in a session's log.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameMessage {
    /// Message identifier.
    pub id: Uuid,
    /// Owning session.
    pub session_id: Uuid,
    /// Turn this message belongs to.
    pub turn_number: u32,
    /// Author.
    pub message_type: MessageType,
    /// Text.
    pub content: String,
    /// When the message was written.
    pub created_at: DateTime<Utc>,
}

impl GameMessage {
    /// A message typed by the player.
    #[must_use]
    pub fn player_action(
        session_id: Uuid,
        turn_number: u32,
        content: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self::new(session_id, turn_number, MessageType::PlayerAction, content, at)
    }

    /// A message narrated by the DM.
    #[must_use]
    pub fn dm_response(
        session_id: Uuid,
        turn_number: u32,
        content: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self::new(session_id, turn_number, MessageType::DmResponse, content, at)
    }

    fn new(
        session_id: Uuid,
        turn_number: u32,
        message_type: MessageType,
        content: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            turn_number,
            message_type,
            content: content.into(),
            created_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_wire_names() {
        assert_eq!(
            serde_json::to_value(MessageType::DmResponse).unwrap(),
            "dm_response"
        );
        assert_eq!(
            serde_json::to_value(MessageType::PlayerAction).unwrap(),
            "player_action"
        );
    }

    #[test]
    fn test_constructors_share_turn() {
        let session_id = Uuid::new_v4();
        let now = Utc::now();
        let player = GameMessage::player_action(session_id, 3, "I open the door", now);
        let dm = GameMessage::dm_response(session_id, 3, "It creaks.", now);

        assert_eq!(player.turn_number, dm.turn_number);
        assert_ne!(player.id, dm.id);
        assert_eq!(dm.message_type, MessageType::DmResponse);
    }
}
