//! Stateless turn endpoint: the caller sends the character and session, the
//! server narrates and returns the new game state without storing anything.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use questlog_character::domain::aggregates::Character;
use questlog_core::error::DomainError;
use questlog_narrative::application::command_handlers::{TurnRequest, narrate_turn};
use questlog_narrative::domain::prompt::Personality;
use questlog_narrative::domain::reducer::TurnState;
use questlog_session::domain::aggregates::GameSession;
use questlog_session::domain::messages::GameMessage;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /turn.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequestBody {
    /// What the player typed.
    pub player_action: Option<String>,
    /// The character sheet before the turn.
    pub character: Option<Character>,
    /// The session before the turn.
    pub session: Option<GameSession>,
    /// Recent log entries, oldest first.
    #[serde(default)]
    pub recent_messages: Vec<GameMessage>,
    /// Personality key; unknown keys mean classic fantasy.
    pub personality: Option<String>,
}

/// Response body for POST /turn.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    /// Narrator prose.
    pub dm_response: String,
    /// State after the turn.
    pub game_state: TurnState,
}

/// POST /turn
#[instrument(skip(state, request))]
async fn play_turn(
    State(state): State<AppState>,
    Json(request): Json<TurnRequestBody>,
) -> Result<Json<TurnResponse>, ApiError> {
    let player_action = request
        .player_action
        .as_deref()
        .map(str::trim)
        .filter(|action| !action.is_empty());
    let (Some(player_action), Some(character), Some(session)) =
        (player_action, request.character.as_ref(), request.session.as_ref())
    else {
        return Err(DomainError::Validation(
            "playerAction, character and session are required".into(),
        )
        .into());
    };

    let correlation_id = Uuid::new_v4();
    info!(
        %correlation_id,
        session_id = %session.id,
        backend = %session.ai_provider,
        "handling game turn"
    );

    let personality = request
        .personality
        .as_deref()
        .map(Personality::from_key)
        .unwrap_or_default();

    let outcome = narrate_turn(
        state.narration.for_backend(session.ai_provider),
        state.extractor.as_ref(),
        &TurnRequest {
            player_action,
            character,
            session,
            recent_messages: &request.recent_messages,
            personality,
        },
    )
    .await;

    Ok(Json(TurnResponse {
        dm_response: outcome.narration,
        game_state: outcome.state,
    }))
}

/// Returns the router for the turn endpoint.
pub fn router() -> Router<AppState> {
    Router::new().route("/turn", post(play_turn))
}
