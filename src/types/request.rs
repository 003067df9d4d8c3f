use serde::{Deserialize, Serialize};

/// Trip preferences sent by the client.
///
/// `days` stays a string because that is what the frontend posts; it is only
/// ever interpolated into the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub days: String,
    pub interests: Vec<String>,
    #[serde(rename = "startDate")]
    pub start_date: String,
}

impl ItineraryRequest {
    pub fn new(
        days: impl Into<String>,
        interests: Vec<String>,
        start_date: impl Into<String>,
    ) -> Self {
        Self {
            days: days.into(),
            interests,
            start_date: start_date.into(),
        }
    }

    /// Interests joined the way they appear in the prompt.
    pub fn joined_interests(&self) -> String {
        self.interests.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_start_date() {
        let request: ItineraryRequest = serde_json::from_value(json!({
            "days": "3",
            "interests": ["temples", "food"],
            "startDate": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(request.start_date, "2024-01-01");
        assert_eq!(request.joined_interests(), "temples, food");
    }

    #[test]
    fn test_missing_field_rejected() {
        let result = serde_json::from_value::<ItineraryRequest>(json!({
            "days": "3",
            "interests": []
        }));
        assert!(result.is_err());
    }
}
