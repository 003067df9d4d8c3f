use crate::completion_schema;
use schemars::JsonSchema;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Day-by-day itinerary produced by the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[completion_schema(name = "Itinerary")]
pub struct ItineraryResponse {
    /// Ordered list of days, starting at day 1
    pub itinerary: Vec<DayPlan>,
    /// Keys the model added beyond the documented shape, returned as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Plan for a single day of the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DayPlan {
    /// 1-based day counter within the itinerary
    #[serde(deserialize_with = "whole_number")]
    #[schemars(with = "u32")]
    pub day: u32,
    /// Short theme for the day
    pub theme: String,
    /// Activities in chronological order
    pub schedule: Vec<ScheduleItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One slot in a day's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleItem {
    /// Time window, e.g. "09:00 - 14:00"
    pub time: String,
    /// What happens in this slot
    pub activity: String,
    /// Optional note about the place or activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts `1` and `1.0` alike; JSON Schema treats both as integers.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let number = Number::deserialize(deserializer)?;
    if let Some(value) = number.as_u64() {
        return u32::try_from(value).map_err(|_| D::Error::custom(format!("day {number} is out of range")));
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) => {
            Ok(value as u32)
        }
        _ => Err(D::Error::custom(format!("day must be a whole number, got {number}"))),
    }
}

impl ItineraryResponse {
    pub fn days(&self) -> usize {
        self.itinerary.len()
    }

    /// Total number of schedule slots across all days.
    pub fn activity_count(&self) -> usize {
        self.itinerary.iter().map(|day| day.schedule.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CompletionSchema;
    use serde_json::json;

    #[test]
    fn test_schema_names_itinerary_fields() {
        let schema = ItineraryResponse::schema();
        assert_eq!(schema.schema_name(), "Itinerary");
        assert_eq!(schema.type_name(), "ItineraryResponse");

        let json = schema.schema_json();
        assert_eq!(json["title"], "Itinerary");
        assert!(json["properties"]["itinerary"].is_object());
        assert_eq!(json["required"], json!(["itinerary"]));
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let item = ScheduleItem {
            time: "08:00 - 09:00".to_string(),
            activity: "Breakfast".to_string(),
            details: None,
            extra: Map::new(),
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"time": "08:00 - 09:00", "activity": "Breakfast"}));
    }

    #[test]
    fn test_counts() {
        let plan: ItineraryResponse = serde_json::from_value(json!({
            "itinerary": [
                {"day": 1, "theme": "Temples", "schedule": [
                    {"time": "06:00 - 10:00", "activity": "Darshan"},
                    {"time": "12:00 - 13:00", "activity": "Lunch", "details": "Local thali"}
                ]},
                {"day": 2, "theme": "Nature", "schedule": [
                    {"time": "09:00 - 12:00", "activity": "Waterfall"}
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(plan.days(), 2);
        assert_eq!(plan.activity_count(), 3);
    }

    #[test]
    fn test_whole_float_day() {
        let day: DayPlan =
            serde_json::from_value(json!({"day": 2.0, "theme": "Nature", "schedule": []})).unwrap();
        assert_eq!(day.day, 2);

        assert!(
            serde_json::from_value::<DayPlan>(json!({"day": 1.5, "theme": "x", "schedule": []}))
                .is_err()
        );
        assert!(
            serde_json::from_value::<DayPlan>(json!({"day": -1, "theme": "x", "schedule": []}))
                .is_err()
        );
    }

    #[test]
    fn test_schema_keeps_day_integer() {
        let json = ItineraryResponse::schema().schema_json();
        assert_eq!(json["definitions"]["DayPlan"]["properties"]["day"]["type"], "integer");
    }
}
