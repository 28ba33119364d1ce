//! Test gateways: `NarrationGateway` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use questlog_core::narration::{NarrationError, NarrationGateway};

/// A gateway that always answers with the same reply and records every
/// prompt pair it was given.
#[derive(Debug)]
pub struct ScriptedGateway {
    reply: String,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGateway {
    /// Create a gateway that answers with `reply`.
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of `(system_prompt, user_message)` pairs received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NarrationGateway for ScriptedGateway {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, NarrationError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_owned(), user_message.to_owned()));
        Ok(self.reply.clone())
    }
}

/// A gateway that always fails with a transport error.
#[derive(Debug)]
pub struct FailingGateway;

#[async_trait]
impl NarrationGateway for FailingGateway {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn complete(
        &self,
        _system_prompt: &str,
        _user_message: &str,
    ) -> Result<String, NarrationError> {
        Err(NarrationError::Transport("connection reset by peer".into()))
    }
}
