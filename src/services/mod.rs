pub mod catalog;
pub mod engine;
pub mod filters;
pub mod personalized;
pub mod routines;
pub mod sources;

pub use catalog::Catalog;
pub use engine::{EngineSnapshot, RecommendationEngine};
pub use routines::RoutineSuggester;
