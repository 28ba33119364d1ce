//! Routes for the Character Management bounded context.

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use questlog_character::application::command_handlers;
use questlog_character::application::query_handlers::{self, CharacterView};
use questlog_character::domain::class::CharacterClass;
use questlog_character::domain::commands;
use questlog_character::domain::inventory::{InventoryItem, ItemType};
use questlog_character::domain::spells::{CastResult, Spell};
use questlog_core::error::DomainError;
use questlog_narrative::application::command_handlers::handle_generate_backstory;
use questlog_narrative::domain::commands::GenerateBackstory;
use questlog_session::domain::backend::NarrationBackend;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /create.
#[derive(Debug, Deserialize)]
pub struct CreateCharacterRequest {
    /// Display name.
    pub name: String,
    /// Class name; defaults to Warrior.
    pub class: Option<String>,
    /// Optional flavor text.
    pub backstory: Option<String>,
}

/// Query string for POST /{id}/backstory.
#[derive(Debug, Deserialize)]
pub struct BackstoryParams {
    /// Narration backend to ask; defaults to gemini.
    pub ai_provider: Option<String>,
}

/// Request body for POST /{id}/inventory.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    /// Item name.
    pub item_name: String,
    /// Item category.
    #[serde(default)]
    pub item_type: ItemType,
    /// How many; defaults to one.
    #[serde(default = "one")]
    pub quantity: u32,
    /// Free-form item properties.
    pub properties: Option<serde_json::Value>,
}

const fn one() -> u32 {
    1
}

/// Request body for POST /{id}/spells.
#[derive(Debug, Deserialize)]
pub struct LearnSpellRequest {
    /// Name of a spell from the character's class catalog.
    pub spell_name: String,
}

/// Request body for POST /{id}/spells/{spell_id}/cast.
#[derive(Debug, Default, Deserialize)]
pub struct CastSpellRequest {
    /// Creature the spell is aimed at, if any.
    pub target: Option<String>,
}

/// Response body for deletions.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// Identifier of the removed record.
    pub deleted: Uuid,
}

fn parse_class(name: Option<&str>) -> Result<CharacterClass, DomainError> {
    match name {
        None => Ok(CharacterClass::default()),
        Some(name) => CharacterClass::from_name(name)
            .ok_or_else(|| DomainError::Validation(format!("unknown character class: {name}"))),
    }
}

fn parse_backend(name: Option<&str>) -> Result<NarrationBackend, DomainError> {
    match name {
        None => Ok(NarrationBackend::default()),
        Some(name) => NarrationBackend::from_name(name)
            .ok_or_else(|| DomainError::Validation(format!("unknown AI provider: {name}"))),
    }
}

/// POST /create
#[instrument(skip(state, request), fields(name = %request.name))]
async fn create_character(
    State(state): State<AppState>,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<Json<CharacterView>, ApiError> {
    let command = commands::CreateCharacter {
        correlation_id: Uuid::new_v4(),
        name: request.name,
        class: parse_class(request.class.as_deref())?,
        backstory: request.backstory,
    };

    info!(correlation_id = %command.correlation_id, "handling create_character command");

    let character = command_handlers::handle_create_character(
        &command,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;

    Ok(Json(character.into()))
}

/// GET /
async fn list_characters(
    State(state): State<AppState>,
) -> Result<Json<Vec<CharacterView>>, ApiError> {
    Ok(Json(query_handlers::list_characters(state.store.as_ref()).await?))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_character(
    State(state): State<AppState>,
    Path(character_id): Path<Uuid>,
) -> Result<Json<CharacterView>, ApiError> {
    Ok(Json(
        query_handlers::get_character_by_id(character_id, state.store.as_ref()).await?,
    ))
}

/// DELETE /{id}
#[instrument(skip(state))]
async fn delete_character(
    State(state): State<AppState>,
    Path(character_id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let command = commands::DeleteCharacter {
        correlation_id: Uuid::new_v4(),
        character_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_character command");

    command_handlers::handle_delete_character(&command, state.store.as_ref()).await?;

    Ok(Json(DeletedResponse {
        deleted: character_id,
    }))
}

/// POST /{id}/backstory
#[instrument(skip(state, params))]
async fn generate_backstory(
    State(state): State<AppState>,
    Path(character_id): Path<Uuid>,
    Query(params): Query<BackstoryParams>,
) -> Result<Json<CharacterView>, ApiError> {
    let backend = parse_backend(params.ai_provider.as_deref())?;
    let command = GenerateBackstory {
        correlation_id: Uuid::new_v4(),
        character_id,
    };

    info!(correlation_id = %command.correlation_id, %backend, "handling generate_backstory command");

    let character = handle_generate_backstory(
        &command,
        state.clock.as_ref(),
        state.narration.for_backend(backend),
        state.store.as_ref(),
    )
    .await?;

    Ok(Json(character.into()))
}

/// GET /{id}/inventory
async fn list_inventory(
    State(state): State<AppState>,
    Path(character_id): Path<Uuid>,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    Ok(Json(
        query_handlers::list_inventory(character_id, state.store.as_ref()).await?,
    ))
}

/// POST /{id}/inventory
#[instrument(skip(state, request), fields(item_name = %request.item_name))]
async fn add_item(
    State(state): State<AppState>,
    Path(character_id): Path<Uuid>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<InventoryItem>, ApiError> {
    let command = commands::AddItem {
        correlation_id: Uuid::new_v4(),
        character_id,
        item_name: request.item_name,
        item_type: request.item_type,
        quantity: request.quantity,
        properties: request.properties,
    };

    info!(correlation_id = %command.correlation_id, "handling add_item command");

    let item =
        command_handlers::handle_add_item(&command, state.clock.as_ref(), state.store.as_ref())
            .await?;

    Ok(Json(item))
}

/// DELETE /{id}/inventory/{item_id}
#[instrument(skip(state))]
async fn remove_item(
    State(state): State<AppState>,
    Path((character_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let command = commands::RemoveItem {
        correlation_id: Uuid::new_v4(),
        character_id,
        item_id,
    };

    info!(correlation_id = %command.correlation_id, "handling remove_item command");

    command_handlers::handle_remove_item(&command, state.store.as_ref()).await?;

    Ok(Json(DeletedResponse { deleted: item_id }))
}

/// GET /{id}/spells
async fn list_spells(
    State(state): State<AppState>,
    Path(character_id): Path<Uuid>,
) -> Result<Json<Vec<Spell>>, ApiError> {
    Ok(Json(
        query_handlers::list_spells(character_id, state.store.as_ref()).await?,
    ))
}

/// POST /{id}/spells
#[instrument(skip(state, request), fields(spell_name = %request.spell_name))]
async fn learn_spell(
    State(state): State<AppState>,
    Path(character_id): Path<Uuid>,
    Json(request): Json<LearnSpellRequest>,
) -> Result<Json<Spell>, ApiError> {
    let command = commands::LearnSpell {
        correlation_id: Uuid::new_v4(),
        character_id,
        spell_name: request.spell_name,
    };

    info!(correlation_id = %command.correlation_id, "handling learn_spell command");

    let spell =
        command_handlers::handle_learn_spell(&command, state.clock.as_ref(), state.store.as_ref())
            .await?;

    Ok(Json(spell))
}

/// DELETE /{id}/spells/{spell_id}
#[instrument(skip(state))]
async fn forget_spell(
    State(state): State<AppState>,
    Path((character_id, spell_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let command = commands::ForgetSpell {
        correlation_id: Uuid::new_v4(),
        character_id,
        spell_id,
    };

    info!(correlation_id = %command.correlation_id, "handling forget_spell command");

    command_handlers::handle_forget_spell(&command, state.store.as_ref()).await?;

    Ok(Json(DeletedResponse { deleted: spell_id }))
}

/// POST /{id}/spells/{spell_id}/cast
#[instrument(skip(state, request))]
async fn cast_spell(
    State(state): State<AppState>,
    Path((character_id, spell_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<CastSpellRequest>,
) -> Result<Json<CastResult>, ApiError> {
    let command = commands::CastSpell {
        correlation_id: Uuid::new_v4(),
        character_id,
        spell_id,
        target: request.target,
    };

    info!(correlation_id = %command.correlation_id, "handling cast_spell command");

    let result = command_handlers::handle_cast_spell(
        &command,
        state.clock.as_ref(),
        &state.rng,
        state.store.as_ref(),
    )
    .await?;

    Ok(Json(result))
}

/// Returns the router for the character context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_character))
        .route("/", get(list_characters))
        .route("/{id}", get(get_character).delete(delete_character))
        .route("/{id}/backstory", post(generate_backstory))
        .route("/{id}/inventory", get(list_inventory).post(add_item))
        .route("/{id}/inventory/{item_id}", delete(remove_item))
        .route("/{id}/spells", get(list_spells).post(learn_spell))
        .route("/{id}/spells/{spell_id}", delete(forget_spell))
        .route("/{id}/spells/{spell_id}/cast", post(cast_spell))
}
