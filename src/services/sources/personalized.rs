use std::time::Duration;

use crate::{
    error::AppResult,
    models::{NormalizedPreferences, RecommendationSet},
    services::personalized,
};

use super::RecommendationSource;

/// Profile-synthesized recommendations, standing in for a model-backed service
#[derive(Debug, Clone)]
pub struct PersonalizedSource {
    latency: Duration,
}

impl PersonalizedSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait::async_trait]
impl RecommendationSource for PersonalizedSource {
    async fn generate(&self, preferences: &NormalizedPreferences) -> AppResult<RecommendationSet> {
        tokio::time::sleep(self.latency).await;
        Ok(personalized::synthesize(preferences))
    }

    fn name(&self) -> &'static str {
        "personalized"
    }
}
