use std::{sync::Arc, time::Duration};

use crate::{
    error::AppResult,
    models::{NormalizedPreferences, RecommendationSet},
    services::{catalog::Catalog, filters},
};

use super::RecommendationSource;

/// Rule-based filtering over the static catalog
#[derive(Debug, Clone)]
pub struct CatalogSource {
    catalog: Arc<Catalog>,
    latency: Duration,
}

impl CatalogSource {
    pub fn new(catalog: Arc<Catalog>, latency: Duration) -> Self {
        Self { catalog, latency }
    }
}

#[async_trait::async_trait]
impl RecommendationSource for CatalogSource {
    async fn generate(&self, preferences: &NormalizedPreferences) -> AppResult<RecommendationSet> {
        tokio::time::sleep(self.latency).await;

        let set = filters::filter_all(&self.catalog, preferences);
        tracing::debug!(
            source = self.name(),
            total = set.len(),
            "Filtered catalog recommendations"
        );
        Ok(set)
    }

    fn name(&self) -> &'static str {
        "catalog"
    }
}
