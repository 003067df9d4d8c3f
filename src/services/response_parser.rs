use serde_json::Value;

use crate::{
    error::{PlannerError, Result},
    schemas::decode_structured,
    types::ItineraryResponse,
};

const FENCE_MARKERS: [&str; 2] = ["```json", "```"];

/// Remove code-fence markers and surrounding whitespace from model output.
///
/// Every occurrence is removed, not just a leading/trailing pair. `"```json"`
/// is removed before `"```"` so the language tag goes with it.
pub fn strip_fences(raw: &str) -> String {
    let mut cleaned = raw.trim().to_string();
    for marker in FENCE_MARKERS {
        cleaned = cleaned.replace(marker, "");
    }
    cleaned.trim().to_string()
}

/// Decode raw model output into an [`ItineraryResponse`].
pub fn parse_itinerary(raw: &str) -> Result<ItineraryResponse> {
    let cleaned = strip_fences(raw);
    if cleaned.is_empty() {
        return Err(PlannerError::Parse("model returned no content".to_string()));
    }

    let value: Value = serde_json::from_str(&cleaned).map_err(|err| {
        PlannerError::Parse(format!("output is not valid JSON: {err}"))
    })?;

    decode_structured::<ItineraryResponse>(value)
}
