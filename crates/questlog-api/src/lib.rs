//! Questlog: HTTP API.
//!
//! Exposed as a library so integration tests can build the same router the
//! server binary runs.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with restricted origins once a
    // hosted front end exists.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/game", routes::turn::router())
        .nest("/api/v1/rules", routes::rules::router())
        .nest("/api/v1/characters", routes::character::router())
        .nest("/api/v1/sessions", routes::session::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
