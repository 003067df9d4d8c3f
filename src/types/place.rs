use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A point of interest from the static catalog.
///
/// Only `name` is required; an entry without one makes the whole catalog
/// unavailable. Every other key is kept in `fields` in file order, so the
/// prompt shows each entry as written (after `name`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Place {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Map::new(),
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.with_field("description", description.into())
    }

    pub fn with_category(self, category: impl Into<String>) -> Self {
        self.with_field("category", category.into())
    }

    /// Geographic grouping (e.g. "Tirumala Hills")
    pub fn with_area(self, area: impl Into<String>) -> Self {
        self.with_field("area", area.into())
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    pub fn category(&self) -> Option<&str> {
        self.text("category")
    }

    pub fn area(&self) -> Option<&str> {
        self.text("area")
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_survive() {
        let raw = json!({
            "name": "Kapila Theertham",
            "category": "Temple",
            "timings": "05:00 - 21:00"
        });

        let place: Place = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(place.category(), Some("Temple"));
        assert_eq!(place.fields["timings"], "05:00 - 21:00");
        assert_eq!(serde_json::to_value(&place).unwrap(), raw);
    }

    #[test]
    fn test_file_key_order_is_kept() {
        let raw = r#"{"name":"Chandragiri Fort","timings":"09:00 - 17:00","area":"Chandragiri","description":"Fort and palace museum"}"#;

        let place: Place = serde_json::from_str(raw).unwrap();
        assert_eq!(place.area(), Some("Chandragiri"));
        assert_eq!(serde_json::to_string(&place).unwrap(), raw);
    }

    #[test]
    fn test_name_is_required() {
        let result = serde_json::from_value::<Place>(json!({"description": "unnamed"}));
        assert!(result.is_err());
    }
}
