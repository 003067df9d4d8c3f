use crate::types::{ItineraryRequest, Place};

pub const DEFAULT_DESTINATION: &str = "Tirupati";
pub const DEFAULT_PRIMARY_ATTRACTION: &str = "Tirumala Temple darshan";

const OUTPUT_EXAMPLE: &str = r#"{
  "itinerary": [
    {
      "day": 1,
      "theme": "A brief theme for the day",
      "schedule": [
        {"time": "08:00 - 09:00", "activity": "Breakfast and start journey"},
        {"time": "09:00 - 14:00", "activity": "Activity Name", "details": "A brief detail about the place."}
      ]
    }
  ]
}"#;

/// Renders the itinerary prompt from a request and the place catalog.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    destination: String,
    primary_attraction: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            destination: DEFAULT_DESTINATION.to_string(),
            primary_attraction: DEFAULT_PRIMARY_ATTRACTION.to_string(),
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn with_primary_attraction(mut self, attraction: impl Into<String>) -> Self {
        self.primary_attraction = attraction.into();
        self
    }

    /// Build the prompt. Same inputs always give the same string.
    pub fn build(&self, request: &ItineraryRequest, places: &[Place]) -> String {
        // Vec<Place> has only string keys, serialization cannot fail
        let catalog = serde_json::to_string_pretty(places).unwrap_or_else(|_| "[]".to_string());

        let instructions = [
            "Create a logical, day-by-day itinerary.".to_string(),
            format!("Prioritize the {}.", self.primary_attraction),
            "Group places that are geographically close.".to_string(),
            "Suggest timings and include buffer time for travel and meals.".to_string(),
            "Recommend one authentic local restaurant for lunch or dinner each day.".to_string(),
            "The final output must be only a valid JSON object, with no extra text or markdown like ```json.".to_string(),
        ];
        let instructions = instructions
            .iter()
            .enumerate()
            .map(|(idx, line)| format!("{}. {}", idx + 1, line))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are an expert {dest} travel planner. Your task is to create a personalized itinerary based on the user's preferences.\n\n\
             User Preferences:\n\
             - Number of Days: {days}\n\
             - Interests: {interests}\n\
             - Travel Start Date: {start}\n\n\
             Available Places in and around {dest} (JSON format):\n\
             {catalog}\n\n\
             Instructions:\n\
             {instructions}\n\n\
             Required JSON Output Structure:\n\
             {example}\n",
            dest = self.destination,
            days = request.days,
            interests = request.joined_interests(),
            start = request.start_date,
            catalog = catalog,
            instructions = instructions,
            example = OUTPUT_EXAMPLE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ItineraryRequest {
        ItineraryRequest::new(
            "2",
            vec!["temples".to_string(), "food".to_string()],
            "2024-01-01",
        )
    }

    fn catalog() -> Vec<Place> {
        vec![
            Place::new("Sri Venkateswara Temple")
                .with_category("Temple")
                .with_area("Tirumala"),
            Place::new("Talakona Waterfalls").with_category("Nature"),
        ]
    }

    #[test]
    fn test_prompt_embeds_preferences() {
        let prompt = PromptBuilder::new().build(&request(), &catalog());

        assert!(prompt.contains("Number of Days: 2"));
        assert!(prompt.contains("Interests: temples, food"));
        assert!(prompt.contains("Travel Start Date: 2024-01-01"));
        assert!(prompt.contains("\"name\": \"Talakona Waterfalls\""));
        assert!(prompt.contains("Prioritize the Tirumala Temple darshan."));
        assert!(prompt.contains("\"itinerary\": ["));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let builder = PromptBuilder::new();
        let first = builder.build(&request(), &catalog());
        let second = builder.build(&request(), &catalog());

        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_destination() {
        let prompt = PromptBuilder::new()
            .with_destination("Madurai")
            .with_primary_attraction("Meenakshi Amman Temple visit")
            .build(&request(), &[]);

        assert!(prompt.contains("expert Madurai travel planner"));
        assert!(prompt.contains("around Madurai"));
        assert!(prompt.contains("Prioritize the Meenakshi Amman Temple visit."));
        assert!(prompt.contains("(JSON format):\n[]"));
    }
}
