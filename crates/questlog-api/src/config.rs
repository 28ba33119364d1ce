//! Server configuration read from the environment.

use std::time::Duration;

use questlog_narrative::gateway::DEFAULT_TIMEOUT_SECS;
use questlog_narrative::gateway::gemini::DEFAULT_GEMINI_MODEL;
use questlog_narrative::gateway::glm::DEFAULT_GLM_MODEL;

use crate::error::AppError;

/// Database URL used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://questlog.db?mode=rwc";

/// `DATABASE_URL` value selecting the in-memory store.
pub const MEMORY_DATABASE: &str = "memory";

/// Where records are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process memory; lost on restart.
    Memory,
    /// A SQLite database at the given URL.
    Sqlite(String),
}

/// Everything the server reads at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Record storage.
    pub store: StoreBackend,
    /// Gemini API key, if any.
    pub gemini_api_key: Option<String>,
    /// Gemini model name.
    pub gemini_model: String,
    /// GLM API key, if any.
    pub glm_api_key: Option<String>,
    /// GLM model name.
    pub glm_model: String,
    /// Per-request narration timeout.
    pub narration_timeout: Duration,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };

        let narration_timeout = match lookup("NARRATION_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                Ok(_) => {
                    return Err(AppError::Config(
                        "NARRATION_TIMEOUT_SECS must be greater than zero".into(),
                    ));
                }
                Err(e) => {
                    return Err(AppError::Config(format!(
                        "NARRATION_TIMEOUT_SECS must be a whole number of seconds: {e}"
                    )));
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let database_url = lookup("DATABASE_URL")
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let store = if database_url.eq_ignore_ascii_case(MEMORY_DATABASE) {
            StoreBackend::Memory
        } else if database_url.starts_with("sqlite:") {
            StoreBackend::Sqlite(database_url)
        } else {
            return Err(AppError::Config(format!(
                "DATABASE_URL must be `{MEMORY_DATABASE}` or a sqlite: URL, got {database_url}"
            )));
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            store,
            gemini_api_key: lookup("GEMINI_API_KEY"),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
            glm_api_key: lookup("GLM_API_KEY"),
            glm_model: lookup("GLM_MODEL").unwrap_or_else(|| DEFAULT_GLM_MODEL.to_owned()),
            narration_timeout,
        })
    }
}
