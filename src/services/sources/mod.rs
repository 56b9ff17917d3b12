//! Recommendation source abstraction
//!
//! A source turns a normalized profile into a full recommendation set. The
//! engine only sees this trait, so a networked backend can replace the local
//! sources without changing callers.
use crate::{
    error::AppResult,
    models::{NormalizedPreferences, RecommendationSet},
};

pub mod catalog;
pub mod personalized;

pub use catalog::CatalogSource;
pub use personalized::PersonalizedSource;

/// Trait for recommendation backends
///
/// `generate` is the single suspension point of a recommendation run. It must
/// populate every category or fail as a whole.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Produce recommendations for every category
    async fn generate(&self, preferences: &NormalizedPreferences) -> AppResult<RecommendationSet>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
