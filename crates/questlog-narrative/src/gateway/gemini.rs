//! Google Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use questlog_core::narration::{NarrationError, NarrationGateway};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{http_client, non_blank, provider_error, transport_error};

/// Generative Language API root.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Narration through Gemini, with the prompt sent as a system instruction.
#[derive(Debug, Clone)]
pub struct GeminiGateway {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiGateway {
    /// Creates a client. A missing or blank key makes every call fail with
    /// `NarrationError::NotConfigured`.
    #[must_use]
    pub fn new(api_key: Option<String>, model: &str, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: GEMINI_API_BASE.to_owned(),
            model: model.to_owned(),
            api_key: non_blank(api_key),
        }
    }

    /// Points the client at another API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

fn build_request(system_prompt: &str, user_message: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: system_prompt.to_owned(),
            }],
        },
        contents: vec![Content {
            role: Some("user".to_owned()),
            parts: vec![Part {
                text: user_message.to_owned(),
            }],
        }],
    }
}

fn response_text(response: GenerateContentResponse) -> Result<String, NarrationError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| NarrationError::InvalidResponse("no candidates in response".into()))?;

    Ok(candidate
        .content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect())
}

#[async_trait]
impl NarrationGateway for GeminiGateway {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, NarrationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(NarrationError::NotConfigured("gemini"))?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&build_request(system_prompt, user_message))
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| NarrationError::InvalidResponse(e.to_string()))?;

        let text = response_text(body)?;
        debug!(model = %self.model, chars = text.len(), "gemini completion received");
        Ok(text)
    }
}
