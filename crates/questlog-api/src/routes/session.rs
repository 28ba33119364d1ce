//! Routes for the Session & Progress bounded context.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use questlog_core::error::DomainError;
use questlog_narrative::application::command_handlers::{TurnReport, handle_submit_action};
use questlog_narrative::domain::commands::SubmitAction;
use questlog_narrative::domain::prompt::Personality;
use questlog_session::application::{command_handlers, query_handlers};
use questlog_session::domain::aggregates::GameSession;
use questlog_session::domain::backend::NarrationBackend;
use questlog_session::domain::commands;
use questlog_session::domain::messages::GameMessage;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /start.
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// The character who will play.
    pub character_id: Uuid,
    /// Narration backend; defaults to gemini.
    pub ai_provider: Option<String>,
}

/// Query string for GET /.
#[derive(Debug, Deserialize)]
pub struct ListSessionsParams {
    /// Only sessions of this character.
    pub character_id: Option<Uuid>,
}

/// Request body for POST /{id}/actions.
#[derive(Debug, Deserialize)]
pub struct SubmitActionRequest {
    /// What the player typed.
    pub player_action: String,
    /// Personality key; unknown keys mean classic fantasy.
    pub personality: Option<String>,
}

/// POST /start
#[instrument(skip(state, request), fields(character_id = %request.character_id))]
async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<GameSession>, ApiError> {
    let ai_provider = request
        .ai_provider
        .as_deref()
        .map(|name| {
            NarrationBackend::from_name(name)
                .ok_or_else(|| DomainError::Validation(format!("unknown AI provider: {name}")))
        })
        .transpose()?;

    let command = commands::StartSession {
        correlation_id: Uuid::new_v4(),
        character_id: request.character_id,
        ai_provider,
    };

    info!(correlation_id = %command.correlation_id, "handling start_session command");

    let session = command_handlers::handle_start_session(
        &command,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;

    Ok(Json(session))
}

/// GET /
async fn list_sessions(
    State(state): State<AppState>,
    Query(params): Query<ListSessionsParams>,
) -> Result<Json<Vec<GameSession>>, ApiError> {
    let sessions = match params.character_id {
        Some(character_id) => {
            query_handlers::list_sessions_for_character(character_id, state.store.as_ref())
                .await?
        }
        None => query_handlers::list_sessions(state.store.as_ref()).await?,
    };
    Ok(Json(sessions))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GameSession>, ApiError> {
    Ok(Json(
        query_handlers::get_session_by_id(session_id, state.store.as_ref()).await?,
    ))
}

/// POST /{id}/end
#[instrument(skip(state))]
async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GameSession>, ApiError> {
    let command = commands::EndSession {
        correlation_id: Uuid::new_v4(),
        session_id,
    };

    info!(correlation_id = %command.correlation_id, "handling end_session command");

    let session =
        command_handlers::handle_end_session(&command, state.clock.as_ref(), state.store.as_ref())
            .await?;

    Ok(Json(session))
}

/// GET /{id}/messages
async fn list_messages(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<GameMessage>>, ApiError> {
    Ok(Json(
        query_handlers::list_messages(session_id, state.store.as_ref()).await?,
    ))
}

/// POST /{id}/actions
#[instrument(skip(state, request))]
async fn submit_action(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SubmitActionRequest>,
) -> Result<Json<TurnReport>, ApiError> {
    let command = SubmitAction {
        correlation_id: Uuid::new_v4(),
        session_id,
        player_action: request.player_action,
        personality: request
            .personality
            .as_deref()
            .map(Personality::from_key)
            .unwrap_or_default(),
    };

    info!(correlation_id = %command.correlation_id, "handling submit_action command");

    let report = handle_submit_action(
        &command,
        state.clock.as_ref(),
        &state.narration,
        state.extractor.as_ref(),
        state.store.as_ref(),
        &state.session_locks,
    )
    .await?;

    Ok(Json(report))
}

/// Returns the router for the session context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_session))
        .route("/", get(list_sessions))
        .route("/{id}", get(get_session))
        .route("/{id}/end", post(end_session))
        .route("/{id}/messages", get(list_messages))
        .route("/{id}/actions", post(submit_action))
}
