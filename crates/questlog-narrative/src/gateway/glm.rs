//! Zhipu GLM chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use questlog_core::narration::{NarrationError, NarrationGateway};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{http_client, non_blank, provider_error, transport_error};

/// Chat completions endpoint.
pub const GLM_API_URL: &str = "https://open.bigmodel.cn/api/paas/v4/chat/completions";

/// Default GLM model.
pub const DEFAULT_GLM_MODEL: &str = "glm-4";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

/// Narration through GLM. The system prompt and the player message travel
/// together as a single user message.
#[derive(Debug, Clone)]
pub struct GlmGateway {
    client: Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl GlmGateway {
    /// Creates a client. A missing or blank key makes every call fail with
    /// `NarrationError::NotConfigured`.
    #[must_use]
    pub fn new(api_key: Option<String>, model: &str, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            url: GLM_API_URL.to_owned(),
            model: model.to_owned(),
            api_key: non_blank(api_key),
        }
    }

    /// Points the client at another endpoint.
    #[must_use]
    pub fn with_url(mut self, url: &str) -> Self {
        url.clone_into(&mut self.url);
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChatMessage>,
}

fn build_request(model: &str, system_prompt: &str, user_message: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_owned(),
        messages: vec![ChatMessage {
            role: "user".to_owned(),
            content: Some(format!("{system_prompt}\n\nUser message: {user_message}")),
        }],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// First choice's content; empty when the provider sent none.
fn response_content(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_default()
}

#[async_trait]
impl NarrationGateway for GlmGateway {
    fn name(&self) -> &'static str {
        "glm"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, NarrationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(NarrationError::NotConfigured("glm"))?;

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&build_request(&self.model, system_prompt, user_message))
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| NarrationError::InvalidResponse(e.to_string()))?;

        let text = response_content(body);
        debug!(model = %self.model, chars = text.len(), "glm completion received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_folds_system_prompt_into_user_message() {
        let request = build_request(DEFAULT_GLM_MODEL, "You are the DM.", "I look around");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "glm-4");
        assert_eq!(json["max_tokens"], 500);
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(
            messages[0]["content"],
            "You are the DM.\n\nUser message: I look around"
        );
    }

    #[test]
    fn test_response_content_reads_first_choice() {
        let body: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "A bard waves." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }))
        .unwrap();

        assert_eq!(response_content(body), "A bard waves.");
    }

    #[test]
    fn test_missing_content_is_empty() {
        let empty: ChatResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        let no_message: ChatResponse =
            serde_json::from_value(serde_json::json!({ "choices": [{}] })).unwrap();

        assert_eq!(response_content(empty), "");
        assert_eq!(response_content(no_message), "");
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let gateway = GlmGateway::new(Some(String::new()), DEFAULT_GLM_MODEL, Duration::from_secs(5))
            .with_url("http://localhost:9/never");

        let result = gateway.complete("system", "user").await;

        assert!(matches!(result, Err(NarrationError::NotConfigured("glm"))));
    }
}
