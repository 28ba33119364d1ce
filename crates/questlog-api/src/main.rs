//! Questlog API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use questlog_api::config::{AppConfig, StoreBackend};
use questlog_api::error::AppError;
use questlog_api::state::AppState;
use questlog_core::clock::SystemClock;
use questlog_core::record::RecordStore;
use questlog_core::rng::{DeterministicRng, SystemRng};
use questlog_narrative::domain::extraction::TagPatternExtractor;
use questlog_narrative::gateway::{GeminiGateway, GlmGateway, NarrationBackends};
use questlog_store::{MemoryRecordStore, SqliteRecordStore};
use tracing_subscriber::EnvFilter;

async fn open_store(backend: &StoreBackend) -> Result<Arc<dyn RecordStore>, AppError> {
    match backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory record store; data is lost on restart");
            Ok(Arc::new(MemoryRecordStore::new()))
        }
        StoreBackend::Sqlite(url) => {
            let store = SqliteRecordStore::connect(url)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            Ok(Arc::new(store))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Questlog API server");

    let config = AppConfig::from_env()?;
    let store = open_store(&config.store).await?;

    let narration = NarrationBackends::new(
        Arc::new(GeminiGateway::new(
            config.gemini_api_key.clone(),
            &config.gemini_model,
            config.narration_timeout,
        )),
        Arc::new(GlmGateway::new(
            config.glm_api_key.clone(),
            &config.glm_model,
            config.narration_timeout,
        )),
    );
    if config.gemini_api_key.is_none() && config.glm_api_key.is_none() {
        tracing::warn!("no narration API key configured; turns will use fallback narration");
    }

    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(SystemRng::new()));
    let app_state = AppState::new(
        Arc::new(SystemClock),
        rng,
        store,
        Arc::new(narration),
        Arc::new(TagPatternExtractor),
    );

    let app = questlog_api::build_router(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::Server)?;

    axum::serve(listener, app).await.map_err(AppError::Server)?;

    Ok(())
}
