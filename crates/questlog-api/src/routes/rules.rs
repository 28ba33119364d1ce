//! Routes for the Rules & Resolution bounded context.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use questlog_rules::application::command_handlers;
use questlog_rules::application::query_handlers::{self, ArmorClassView, DamageRangeView};
use questlog_rules::domain::attack::AttackOutcome;
use questlog_rules::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /resolve-attack.
#[derive(Debug, Deserialize)]
pub struct ResolveAttackRequest {
    /// Total to-hit bonus of the attacker.
    #[serde(default)]
    pub attack_bonus: i32,
    /// Explicit armor class; wins over `target`.
    pub armor_class: Option<i32>,
    /// Creature name whose armor class is looked up.
    pub target: Option<String>,
    /// Damage formula, e.g. `1d8+2`.
    pub damage_formula: String,
}

/// Request body for POST /predict-damage.
#[derive(Debug, Deserialize)]
pub struct PredictDamageRequest {
    /// Text containing a dice formula.
    pub formula: String,
}

/// POST /resolve-attack
#[instrument(skip(state, request), fields(attack_bonus = request.attack_bonus))]
async fn resolve_attack(
    State(state): State<AppState>,
    Json(request): Json<ResolveAttackRequest>,
) -> Result<Json<AttackOutcome>, ApiError> {
    let command = commands::ResolveAttack {
        correlation_id: Uuid::new_v4(),
        attack_bonus: request.attack_bonus,
        armor_class: request.armor_class,
        target: request.target,
        damage_formula: request.damage_formula,
    };

    info!(correlation_id = %command.correlation_id, "handling resolve_attack command");

    let outcome = command_handlers::handle_resolve_attack(&command, &state.rng)?;

    Ok(Json(outcome))
}

/// POST /predict-damage
async fn predict_damage(Json(request): Json<PredictDamageRequest>) -> Json<DamageRangeView> {
    Json(query_handlers::predict_damage(&request.formula))
}

/// GET /armor-class/{name}
async fn armor_class(Path(name): Path<String>) -> Json<ArmorClassView> {
    Json(query_handlers::armor_class_for(&name))
}

/// Returns the router for the rules context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resolve-attack", post(resolve_attack))
        .route("/predict-damage", post(predict_damage))
        .route("/armor-class/{name}", get(armor_class))
}
