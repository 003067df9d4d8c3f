//! itinerary-planner: turn trip preferences into an LLM-generated, day-by-day itinerary
//!
//! A request flows through a fixed pipeline: load the place catalog, render a
//! prompt, call the generation service, strip fences and decode the reply
//! against the [`ItineraryResponse`] schema. The same pipeline backs the HTTP
//! endpoint (`POST /api/generate-itinerary`) and the CLI.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use itinerary_planner::{GeminiClient, ItineraryRequest, PlaceCatalog, Planner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("GOOGLE_API_KEY").ok();
//!     let planner = Planner::new(Arc::new(GeminiClient::new(api_key)))
//!         .with_catalog(PlaceCatalog::new("data/places.json"));
//!
//!     let request = ItineraryRequest::new("2", vec!["temples".into()], "2024-01-01");
//!     let itinerary = planner.plan(&request).await?;
//!     println!("{}", serde_json::to_string_pretty(&itinerary)?);
//!     Ok(())
//! }
//! ```

extern crate self as itinerary_planner;

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod server;
pub mod services;
pub mod types;

pub use config::{ErrorMode, PlannerConfig};
pub use self::core::{PlaceCatalog, Planner};
pub use error::{PlannerError, Result, GENERIC_ERROR_MESSAGE};
pub use planner_macros::completion_schema;
pub use schemas::{CompletionSchema, SchemaHandle};
pub use services::{
    parse_itinerary, strip_fences, GeminiClient, HttpSettings, OpenAIClient, PromptBuilder,
    Provider, TextGenerator,
};
pub use types::{DayPlan, ItineraryRequest, ItineraryResponse, Place, ScheduleItem};

pub use schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;
