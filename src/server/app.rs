//! Axum app: shared state and router.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::handler::{generate_itinerary, health, GENERATE_ITINERARY_PATH};
use crate::{config::ErrorMode, core::Planner};

/// Shared state for the HTTP server.
///
/// The planner is immutable and cheap to clone; each request gets its own clone of the `Arc`.
#[derive(Clone, Debug)]
pub struct AppState {
    pub(crate) planner: Arc<Planner>,
    pub(crate) error_mode: ErrorMode,
}

impl AppState {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(planner),
            error_mode: ErrorMode::default(),
        }
    }

    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }
}

/// Builds the router: the itinerary endpoint, a health probe, and permissive CORS.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(GENERATE_ITINERARY_PATH, post(generate_itinerary))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}
