use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::generation::{post_json, require_key, HttpSettings, Provider, TextGenerator};
use crate::error::{PlannerError, Result};

/// Google Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    settings: HttpSettings,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl GeminiClient {
    /// A missing key is only reported when [`TextGenerator::generate`] is called.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: Provider::Gemini.default_model().to_string(),
            base_url: Provider::Gemini.default_base_url().to_string(),
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

    pub fn with_settings(mut self, settings: HttpSettings) -> Self {
        self.settings = settings;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = require_key(self.api_key.as_deref(), Provider::Gemini.api_key_env())?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };
        let body = serde_json::to_value(&body)
            .map_err(|err| PlannerError::Service(format!("failed to encode request: {err}")))?;

        debug!(target: "planner::generation", model = %self.model, prompt_len = prompt.len(), "calling Gemini");
        let response = post_json(
            &self.endpoint(),
            &[("x-goog-api-key", api_key.to_string())],
            &body,
            self.settings,
        )
        .await?;

        let response: GenerateContentResponse = serde_json::from_value(response).map_err(|err| {
            PlannerError::Service(format!("unexpected Gemini response shape: {err}"))
        })?;
        response.into_text()
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, with its parts concatenated.
    fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|feedback| feedback.block_reason) {
            return Err(PlannerError::Service(format!(
                "prompt blocked by Gemini: {reason}"
            )));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| PlannerError::Service("Gemini returned no candidates".to_string()))?;

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
            return Err(PlannerError::Service(format!(
                "Gemini returned an empty response (finish reason: {reason})"
            )));
        }

        Ok(text)
    }
}
