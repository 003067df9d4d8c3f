use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    core::catalog::PlaceCatalog,
    error::Result,
    services::{parse_itinerary, PromptBuilder, TextGenerator},
    types::{ItineraryRequest, ItineraryResponse},
};

/// Runs one request through catalog → prompt → model → parser.
///
/// Holds no per-request state, so one instance is shared by every handler.
#[derive(Debug, Clone)]
pub struct Planner {
    catalog: PlaceCatalog,
    prompt_builder: PromptBuilder,
    generator: Arc<dyn TextGenerator>,
}

impl Planner {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            catalog: PlaceCatalog::default(),
            prompt_builder: PromptBuilder::new(),
            generator,
        }
    }

    pub fn with_catalog(mut self, catalog: PlaceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_prompt_builder(mut self, prompt_builder: PromptBuilder) -> Self {
        self.prompt_builder = prompt_builder;
        self
    }

    /// Render the prompt for `request` without calling the model.
    pub async fn render_prompt(&self, request: &ItineraryRequest) -> Result<String> {
        let places = self.catalog.load().await?;
        Ok(self.prompt_builder.build(request, &places))
    }

    pub async fn plan(&self, request: &ItineraryRequest) -> Result<ItineraryResponse> {
        let prompt = self.render_prompt(request).await?;

        let raw = self.generator.generate(&prompt).await?;
        debug!(target: "planner::generation", output = %raw, "raw model output");

        let itinerary = parse_itinerary(&raw)?;
        info!(
            model = self.generator.model(),
            days = itinerary.days(),
            activities = itinerary.activity_count(),
            "itinerary generated"
        );
        Ok(itinerary)
    }
}
