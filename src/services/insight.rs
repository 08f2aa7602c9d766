use crate::domain::schema::response_schema;
use crate::domain::InsightBatch;
use crate::error::Result;
use crate::infrastructure::{ContentGenerator, GenerateContentRequest};
use crate::services::normalizer::normalize;
use crate::services::query::{build_detail_query, build_trending_query};
use tracing::{error, info};

/// The two fetch entry points the dashboard needs.
///
/// Every call issues exactly one `generateContent` request. Nothing is
/// cached and failures are returned as-is.
pub struct InsightService<G> {
    generator: G,
}

impl<G: ContentGenerator> InsightService<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn fetch_steam_data(&self, query: &str) -> Result<InsightBatch> {
        info!("Fetching Steam data for: {}", query);
        self.fetch(build_detail_query(query)).await
    }

    pub async fn fetch_trending_games(&self) -> Result<InsightBatch> {
        info!("Fetching trending games");
        self.fetch(build_trending_query()).await
    }

    async fn fetch(&self, prompt: String) -> Result<InsightBatch> {
        let request = GenerateContentRequest::grounded_json(prompt, response_schema());

        let response = self
            .generator
            .generate_content(&request)
            .await
            .inspect_err(|e| error!("Error fetching steam data: {}", e))?;

        let (games, sources) =
            normalize(response.text().as_deref(), response.grounding_metadata())
                .inspect_err(|e| error!("Error normalizing steam data: {}", e))?;

        info!(
            "Fetched {} games backed by {} sources",
            games.len(),
            sources.len()
        );

        Ok(InsightBatch::new(games, sources))
    }
}
