use itinerary_planner::{
    schema::{decode_structured, validate_structured_payload, CompletionSchema},
    ItineraryResponse, PlannerError,
};
use serde_json::json;

#[test]
fn test_valid_itinerary_passes() {
    let payload = json!({
        "itinerary": [{
            "day": 1,
            "theme": "Tirumala",
            "schedule": [
                {"time": "05:00 - 11:00", "activity": "Darshan"},
                {"time": "12:30 - 13:30", "activity": "Lunch", "details": "Annamayya Bhavan"}
            ]
        }]
    });

    validate_structured_payload(ItineraryResponse::schema(), &payload).unwrap();

    let plan: ItineraryResponse = decode_structured(payload).unwrap();
    assert_eq!(plan.itinerary[0].schedule[1].details.as_deref(), Some("Annamayya Bhavan"));
}

#[test]
fn test_null_details_accepted() {
    let payload = json!({
        "itinerary": [{"day": 1, "theme": "x", "schedule": [
            {"time": "t", "activity": "a", "details": null}
        ]}]
    });

    let plan: ItineraryResponse = decode_structured(payload).unwrap();
    assert!(plan.itinerary[0].schedule[0].details.is_none());
}

#[test]
fn test_errors_name_paths() {
    let payload = json!({
        "itinerary": [{"day": -1, "theme": 7, "schedule": "soon"}]
    });

    let err = validate_structured_payload(ItineraryResponse::schema(), &payload).unwrap_err();
    let PlannerError::Parse(message) = err else {
        panic!("expected parse error");
    };
    assert!(message.contains("`Itinerary`"));
    assert!(message.contains("/itinerary/0/"));
}

#[test]
fn test_error_list_is_truncated() {
    let payload = json!({
        "itinerary": [
            {"day": "1", "theme": 1, "schedule": 1},
            {"day": "2", "theme": 2, "schedule": 2}
        ]
    });

    let err = decode_structured::<ItineraryResponse>(payload).unwrap_err();
    assert!(err.to_string().contains("additional errors truncated"));
}

#[test]
fn test_top_level_array_rejected() {
    let err = decode_structured::<ItineraryResponse>(json!([1, 2, 3])).unwrap_err();
    assert_eq!(err.error_code(), "PARSE_ERROR");
}
