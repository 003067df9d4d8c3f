use thiserror::Error;

/// Message returned to callers for every failure, whatever the cause.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Failed to generate itinerary. Please check the backend server logs.";

/// Main error type for the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("API key for the generation service is not configured: {0}")]
    MissingCredential(String),

    #[error("Place catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Generation service error: {0}")]
    Service(String),

    #[error("Could not parse model output: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::MissingCredential(_) => "MISSING_CREDENTIAL",
            PlannerError::CatalogUnavailable(_) => "CATALOG_UNAVAILABLE",
            PlannerError::Service(_) => "SERVICE_ERROR",
            PlannerError::Parse(_) => "PARSE_ERROR",
            PlannerError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// HTTP status for this failure when the server reports distinct statuses.
    ///
    /// Failures caused by the upstream model map to 502; local problems to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            PlannerError::Service(_) | PlannerError::Parse(_) => 502,
            PlannerError::MissingCredential(_)
            | PlannerError::CatalogUnavailable(_)
            | PlannerError::Config(_) => 500,
        }
    }

    /// Convert to the caller-facing error payload.
    ///
    /// The detailed message stays in the server logs; the body only names the code.
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": GENERIC_ERROR_MESSAGE,
            "code": self.error_code(),
        })
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PlannerError::Service(format!("request timed out: {err}"))
        } else {
            PlannerError::Service(format!("HTTP request failed: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_statuses() {
        let err = PlannerError::Parse("bad".to_string());
        assert_eq!(err.error_code(), "PARSE_ERROR");
        assert_eq!(err.status_code(), 502);

        let err = PlannerError::MissingCredential("GOOGLE_API_KEY".to_string());
        assert_eq!(err.error_code(), "MISSING_CREDENTIAL");
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_payload_hides_details() {
        let err = PlannerError::CatalogUnavailable("places.json: No such file".to_string());
        let payload = err.to_error_payload();

        assert_eq!(payload["error"], GENERIC_ERROR_MESSAGE);
        assert_eq!(payload["code"], "CATALOG_UNAVAILABLE");
        assert!(!payload.to_string().contains("places.json"));
    }
}
