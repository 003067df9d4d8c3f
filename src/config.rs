//! Runtime configuration, resolved from environment variables with defaults.
//!
//! The CLI overlays its flags on top of [`PlannerConfig::from_env`].

use std::{path::PathBuf, str::FromStr, sync::Arc, time::Duration};

use crate::{
    core::{catalog::DEFAULT_CATALOG_PATH, PlaceCatalog, Planner},
    error::{PlannerError, Result},
    services::{
        prompt::{DEFAULT_DESTINATION, DEFAULT_PRIMARY_ATTRACTION},
        GeminiClient, HttpSettings, OpenAIClient, PromptBuilder, Provider, TextGenerator,
    },
};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// How failures are reported over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Non-2xx status per error kind, body carries the generic message and a code.
    #[default]
    Status,
    /// HTTP 200 with only the generic message, for clients that never check status.
    Legacy,
}

impl FromStr for ErrorMode {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "status" => Ok(ErrorMode::Status),
            "legacy" => Ok(ErrorMode::Legacy),
            other => Err(PlannerError::Config(format!(
                "unknown error mode `{other}` (expected `status` or `legacy`)"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub addr: String,
    pub places_path: PathBuf,
    pub provider: Provider,
    /// `None` picks the provider's default model.
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub max_retries: usize,
    pub error_mode: ErrorMode,
    pub destination: String,
    pub primary_attraction: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let http = HttpSettings::default();
        Self {
            addr: DEFAULT_ADDR.to_string(),
            places_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            provider: Provider::default(),
            model: None,
            api_key: None,
            base_url: None,
            timeout: http.timeout,
            max_retries: http.max_retries,
            error_mode: ErrorMode::default(),
            destination: DEFAULT_DESTINATION.to_string(),
            primary_attraction: DEFAULT_PRIMARY_ATTRACTION.to_string(),
        }
    }
}

impl PlannerConfig {
    /// Builds the config from environment variables, falling back to [`Default`] for unset values.
    ///
    /// Malformed numeric values or an unknown provider/error mode are reported as
    /// [`PlannerError::Config`] rather than silently ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default = Self::default();
        let provider = match lookup("PLANNER_PROVIDER") {
            Some(value) => value.parse()?,
            None => default.provider,
        };

        Ok(Self {
            addr: lookup("PLANNER_ADDR").unwrap_or(default.addr),
            places_path: lookup("PLANNER_PLACES_PATH")
                .map(PathBuf::from)
                .unwrap_or(default.places_path),
            provider,
            model: lookup("PLANNER_MODEL"),
            api_key: provider_api_key(&lookup, provider),
            base_url: lookup("PLANNER_BASE_URL"),
            timeout: match lookup("PLANNER_TIMEOUT_SECS") {
                Some(value) => Duration::from_secs(parse_number(&value, "PLANNER_TIMEOUT_SECS")?),
                None => default.timeout,
            },
            max_retries: match lookup("PLANNER_MAX_RETRIES") {
                Some(value) => parse_number(&value, "PLANNER_MAX_RETRIES")?,
                None => default.max_retries,
            },
            error_mode: match lookup("PLANNER_ERROR_MODE") {
                Some(value) => value.parse()?,
                None => default.error_mode,
            },
            destination: lookup("PLANNER_DESTINATION").unwrap_or(default.destination),
            primary_attraction: lookup("PLANNER_PRIMARY_ATTRACTION")
                .unwrap_or(default.primary_attraction),
        })
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: self.timeout,
            max_retries: self.max_retries,
        }
    }

    /// Construct the configured generation client.
    pub fn generator(&self) -> Arc<dyn TextGenerator> {
        let model = self
            .model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string());
        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| self.provider.default_base_url().to_string());

        match self.provider {
            Provider::Gemini => Arc::new(
                GeminiClient::new(self.api_key.clone())
                    .with_model(model)
                    .with_base_url(base_url)
                    .with_settings(self.http_settings()),
            ),
            Provider::OpenAI => Arc::new(
                OpenAIClient::new(self.api_key.clone())
                    .with_model(model)
                    .with_base_url(base_url)
                    .with_settings(self.http_settings()),
            ),
        }
    }

    pub fn planner(&self) -> Planner {
        Planner::new(self.generator())
            .with_catalog(PlaceCatalog::new(self.places_path.clone()))
            .with_prompt_builder(
                PromptBuilder::new()
                    .with_destination(self.destination.clone())
                    .with_primary_attraction(self.primary_attraction.clone()),
            )
    }
}

/// The provider's key from `lookup`; blank values count as unset.
pub(crate) fn provider_api_key(
    lookup: impl Fn(&str) -> Option<String>,
    provider: Provider,
) -> Option<String> {
    lookup(provider.api_key_env()).filter(|key| !key.trim().is_empty())
}

fn parse_number<T: FromStr>(value: &str, name: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| PlannerError::Config(format!("{name} must be a non-negative integer, got `{value}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.addr, DEFAULT_ADDR);
        assert_eq!(config.provider, Provider::Gemini);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.error_mode, ErrorMode::Status);
        assert!(config.api_key.is_none());
        assert_eq!(config.generator().model(), "gemini-1.5-flash");
    }

    #[test]
    fn test_provider_selects_key_variable() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("PLANNER_PROVIDER", "openai"),
            ("GOOGLE_API_KEY", "google"),
            ("OPENAI_API_KEY", "sk-test"),
            ("PLANNER_ERROR_MODE", "legacy"),
            ("PLANNER_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.error_mode, ErrorMode::Legacy);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.generator().model(), "openai/gpt-4.1-mini");
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = PlannerConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "  ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_error_mode_names() {
        assert_eq!(" Status ".parse::<ErrorMode>().unwrap(), ErrorMode::Status);
        assert_eq!("LEGACY".parse::<ErrorMode>().unwrap(), ErrorMode::Legacy);
        assert!("ok".parse::<ErrorMode>().is_err());
        assert!("200".parse::<ErrorMode>().is_err());
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(matches!(
            PlannerConfig::from_lookup(lookup(&[("PLANNER_MAX_RETRIES", "many")])),
            Err(PlannerError::Config(_))
        ));
        assert!(matches!(
            PlannerConfig::from_lookup(lookup(&[("PLANNER_ERROR_MODE", "loud")])),
            Err(PlannerError::Config(_))
        ));
    }
}
