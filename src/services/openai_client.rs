use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::generation::{post_json, require_key, HttpSettings, Provider, TextGenerator};
use crate::error::{PlannerError, Result};

const SYSTEM_PROMPT: &str =
    "You are a travel planning assistant. Reply with a single JSON object and nothing else.";

/// Client for OpenAI-compatible `chat/completions` endpoints (OpenRouter by default).
#[derive(Clone)]
pub struct OpenAIClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    max_tokens: Option<u32>,
    settings: HttpSettings,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl OpenAIClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: Provider::OpenAI.default_model().to_string(),
            base_url: Provider::OpenAI.default_base_url().to_string(),
            max_tokens: None,
            settings: HttpSettings::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_settings(mut self, settings: HttpSettings) -> Self {
        self.settings = settings;
        self
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt},
            ],
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        body
    }
}

#[async_trait]
impl TextGenerator for OpenAIClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = require_key(self.api_key.as_deref(), Provider::OpenAI.api_key_env())?;

        debug!(target: "planner::generation", model = %self.model, prompt_len = prompt.len(), "calling chat completions");
        let response = post_json(
            &build_chat_url(&self.base_url),
            &[
                ("Authorization", format!("Bearer {api_key}")),
                ("X-Title", "itinerary-planner".to_string()),
            ],
            &self.request_body(prompt),
            self.settings,
        )
        .await?;

        let content = response
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(PlannerError::Service(
                "chat completion returned no message content".to_string(),
            ));
        }

        Ok(content.to_string())
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_chat_url() {
        assert_eq!(
            build_chat_url("https://openrouter.ai/api/v1/"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert_eq!(
            build_chat_url("http://localhost:8080/v1/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body() {
        let body = OpenAIClient::new(Some("k".to_string()))
            .with_model("test-model")
            .with_max_tokens(Some(2048))
            .request_body("plan my trip");

        assert_eq!(body["model"], "test-model");
        assert_eq!(body["messages"][1]["content"], "plan my trip");
        assert_eq!(body["max_tokens"], 2048);
    }
}
