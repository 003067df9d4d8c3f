use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, info};

use super::app::AppState;
use crate::{
    config::ErrorMode,
    error::{PlannerError, GENERIC_ERROR_MESSAGE},
    types::ItineraryRequest,
};

pub const GENERATE_ITINERARY_PATH: &str = "/api/generate-itinerary";

/// Handles `POST /api/generate-itinerary`.
///
/// Body shape is checked by the `Json` extractor; everything after that goes through
/// [`crate::Planner::plan`] and any failure is logged and flattened into the error payload.
pub(crate) async fn generate_itinerary(
    State(state): State<AppState>,
    Json(request): Json<ItineraryRequest>,
) -> Response {
    info!(
        days = %request.days,
        interests = %request.joined_interests(),
        start_date = %request.start_date,
        "itinerary requested"
    );

    match state.planner.plan(&request).await {
        Ok(itinerary) => Json(itinerary).into_response(),
        Err(err) => {
            error!(code = err.error_code(), error = %err, "failed to generate itinerary");
            error_response(&err, state.error_mode)
        }
    }
}

pub(crate) async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn error_response(err: &PlannerError, mode: ErrorMode) -> Response {
    match mode {
        ErrorMode::Status => {
            let status = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(err.to_error_payload())).into_response()
        }
        ErrorMode::Legacy => Json(json!({ "error": GENERIC_ERROR_MESSAGE })).into_response(),
    }
}
