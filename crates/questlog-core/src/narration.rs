//! Narration gateway abstraction.
//!
//! A gateway turns a system prompt and a player message into narrator
//! prose. Backends differ in transport and payload shape but expose this
//! single capability.

use async_trait::async_trait;
use thiserror::Error;

/// Failures raised by a narration backend.
#[derive(Debug, Error)]
pub enum NarrationError {
    /// The request could not be sent or timed out.
    #[error("narration transport failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("narration provider returned {status}: {message}")]
    Provider {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The provider answered with a body we could not read.
    #[error("narration response was invalid: {0}")]
    InvalidResponse(String),

    /// The backend has no credentials configured.
    #[error("narration backend {0} is not configured")]
    NotConfigured(&'static str),
}

/// Text-completion capability used to produce the narrator's reply.
#[async_trait]
pub trait NarrationGateway: Send + Sync {
    /// Short backend name for logging.
    fn name(&self) -> &'static str;

    /// Produce completion text for the given prompt pair.
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, NarrationError>;
}
