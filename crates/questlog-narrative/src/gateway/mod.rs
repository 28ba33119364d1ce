//! HTTP narration backends and per-session backend selection.

pub mod gemini;
pub mod glm;

use std::sync::Arc;
use std::time::Duration;

use questlog_core::narration::{NarrationError, NarrationGateway};
use questlog_session::domain::backend::NarrationBackend;
use reqwest::Client;

pub use gemini::GeminiGateway;
pub use glm::GlmGateway;

/// Default request timeout for narration calls. Completions can be slow.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

fn transport_error(e: &reqwest::Error) -> NarrationError {
    if e.is_timeout() {
        NarrationError::Transport(format!("request timed out: {e}"))
    } else {
        NarrationError::Transport(e.to_string())
    }
}

async fn provider_error(response: reqwest::Response) -> NarrationError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|e| format!("unreadable error body: {e}"));
    NarrationError::Provider { status, message }
}

fn non_blank(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_owned()).filter(|k| !k.is_empty())
}

/// One gateway per backend. A session's stored backend picks which one
/// narrates its turns.
#[derive(Clone)]
pub struct NarrationBackends {
    gemini: Arc<dyn NarrationGateway>,
    glm: Arc<dyn NarrationGateway>,
}

impl NarrationBackends {
    /// Pairs a Gemini gateway with a GLM gateway.
    #[must_use]
    pub fn new(gemini: Arc<dyn NarrationGateway>, glm: Arc<dyn NarrationGateway>) -> Self {
        Self { gemini, glm }
    }

    /// Routes every backend to the same gateway.
    #[must_use]
    pub fn uniform(gateway: Arc<dyn NarrationGateway>) -> Self {
        Self {
            gemini: Arc::clone(&gateway),
            glm: gateway,
        }
    }

    /// The gateway serving `backend`.
    #[must_use]
    pub fn for_backend(&self, backend: NarrationBackend) -> &dyn NarrationGateway {
        match backend {
            NarrationBackend::Gemini => self.gemini.as_ref(),
            NarrationBackend::Glm => self.glm.as_ref(),
        }
    }
}

impl std::fmt::Debug for NarrationBackends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrationBackends")
            .field("gemini", &self.gemini.name())
            .field("glm", &self.glm.name())
            .finish()
    }
}
