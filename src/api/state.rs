use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        catalog::Catalog,
        engine::RecommendationEngine,
        routines::RoutineSuggester,
        sources::{CatalogSource, PersonalizedSource},
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Catalog-filtered recommendations
    pub recommendations: Arc<RecommendationEngine>,
    /// Profile-synthesized recommendations
    pub personalized: Arc<RecommendationEngine>,
    pub routines: Arc<RoutineSuggester>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default(), Arc::new(Catalog::builtin()))
    }
}

impl AppState {
    /// Wires both engines and the routine suggester from configuration
    pub fn new(config: &Config, catalog: Arc<Catalog>) -> Self {
        let catalog_source = CatalogSource::new(catalog, config.recommendation_latency());
        let personalized_source = PersonalizedSource::new(config.personalized_latency());

        Self {
            recommendations: Arc::new(RecommendationEngine::new(Arc::new(catalog_source))),
            personalized: Arc::new(RecommendationEngine::new(Arc::new(personalized_source))),
            routines: Arc::new(RoutineSuggester::new(config.routine_latency())),
        }
    }
}
