use std::{fmt, str::FromStr, time::Duration};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{PlannerError, Result};

/// Backoff before the first retry; doubled after each attempt.
const INITIAL_BACKOFF: Duration = Duration::from_millis(250);

/// An external text-generation model.
#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    /// Model identifier, for logs.
    fn model(&self) -> &str;

    /// Send `prompt` and return the model's raw text output.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Which generation API to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Gemini,
    /// Any OpenAI-compatible `chat/completions` endpoint (OpenRouter by default).
    OpenAI,
}

impl Provider {
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-1.5-flash",
            Provider::OpenAI => "openai/gpt-4.1-mini",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com",
            Provider::OpenAI => "https://openrouter.ai/api/v1",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(self) -> &'static str {
        match self {
            Provider::Gemini => "GOOGLE_API_KEY",
            Provider::OpenAI => "OPENAI_API_KEY",
        }
    }
}

impl FromStr for Provider {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "openai" | "openrouter" => Ok(Provider::OpenAI),
            other => Err(PlannerError::Config(format!(
                "unknown provider `{other}` (expected `gemini` or `openai`)"
            ))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Gemini => f.write_str("gemini"),
            Provider::OpenAI => f.write_str("openai"),
        }
    }
}

/// Transport settings shared by the HTTP-backed generators.
#[derive(Debug, Clone, Copy)]
pub struct HttpSettings {
    pub timeout: Duration,
    /// Extra attempts after a 429 or 5xx. Zero disables retrying.
    pub max_retries: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            max_retries: 0,
        }
    }
}

/// POST `body` as JSON and return the decoded JSON response.
///
/// 429 honours `Retry-After`; 429 and 5xx are retried up to `settings.max_retries` times.
pub(crate) async fn post_json(
    url: &str,
    headers: &[(&str, String)],
    body: &Value,
    settings: HttpSettings,
) -> Result<Value> {
    let client = reqwest::Client::builder()
        .timeout(settings.timeout)
        .build()
        .map_err(|err| PlannerError::Config(format!("Failed to build HTTP client: {err}")))?;

    let mut attempt = 0;
    let mut backoff = INITIAL_BACKOFF;

    loop {
        let mut request = client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs);
        let response_text = response.text().await?;

        let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
        if retryable && attempt < settings.max_retries {
            let wait = retry_after.unwrap_or(backoff);
            let wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
            warn!(%status, attempt, wait_ms, "retrying generation request");
            tokio::time::sleep(wait).await;
            attempt += 1;
            backoff *= 2;
            continue;
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PlannerError::Service(format!(
                "rate limited by generation service (retry after {}s)",
                retry_after.unwrap_or(backoff).as_secs().max(1)
            )));
        }

        let response_json = serde_json::from_str::<Value>(&response_text);

        if !status.is_success() {
            let api_message = response_json
                .as_ref()
                .ok()
                .and_then(|json| json.get("error"))
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or(response_text);

            return Err(PlannerError::Service(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        let response_json = response_json
            .map_err(|err| PlannerError::Service(format!("Failed to parse JSON: {err}")))?;

        if let Some(error) = response_json.get("error") {
            let error_message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(PlannerError::Service(format!("API error: {}", error_message)));
        }

        debug!(target: "planner::generation", %status, attempts = attempt + 1, "generation response received");
        return Ok(response_json);
    }
}

/// Return the key, or `MissingCredential` naming where it should have come from.
pub(crate) fn require_key<'a>(api_key: Option<&'a str>, env_name: &str) -> Result<&'a str> {
    match api_key.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(PlannerError::MissingCredential(format!(
            "set {env_name} or pass --api-key"
        ))),
    }
}
