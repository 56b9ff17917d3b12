use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::{
    models::{RecommendationSet, UserPreferences},
    services::sources::RecommendationSource,
};

/// Message surfaced to the user when a run fails
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate recommendations. Please try again later.";

/// Point-in-time view of an engine, as rendered by the presentation layer
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EngineSnapshot {
    pub recommendations: RecommendationSet,
    pub loading: bool,
    pub error: Option<String>,
    /// Generation that produced `recommendations`; 0 before the first success
    pub generation: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Mutable engine state guarded by the lock
struct EngineState {
    recommendations: RecommendationSet,
    loading: bool,
    error: Option<String>,
    generation: u64,
    updated_at: Option<DateTime<Utc>>,
    last_preferences: Option<UserPreferences>,
}

impl EngineState {
    fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            recommendations: self.recommendations.clone(),
            loading: self.loading,
            error: self.error.clone(),
            generation: self.generation,
            updated_at: self.updated_at,
        }
    }
}

/// Orchestrates recommendation runs against a source
///
/// Each run is tagged with a generation number. When runs overlap, only the
/// most recently issued one may write its outcome; older completions are
/// dropped (last issued wins, not last finished). Failures never escape:
/// they become the user-facing error string and the previous result stays.
pub struct RecommendationEngine {
    source: Arc<dyn RecommendationSource>,
    latest_generation: AtomicU64,
    state: RwLock<EngineState>,
}

impl RecommendationEngine {
    /// Creates an engine with no result yet
    ///
    /// `loading` starts out true: nothing has been produced until the first run.
    pub fn new(source: Arc<dyn RecommendationSource>) -> Self {
        Self {
            source,
            latest_generation: AtomicU64::new(0),
            state: RwLock::new(EngineState {
                recommendations: RecommendationSet::empty(),
                loading: true,
                error: None,
                generation: 0,
                updated_at: None,
                last_preferences: None,
            }),
        }
    }

    /// Name of the underlying source
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Runs the pipeline for a profile and returns the resulting snapshot
    pub async fn get_recommendations(&self, preferences: UserPreferences) -> EngineSnapshot {
        let normalized = preferences.normalize();

        // Issued under the write guard so issue order matches state-write order
        let generation = {
            let mut state = self.state.write().await;
            let generation = self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.loading = true;
            state.error = None;
            state.last_preferences = Some(preferences);
            generation
        };

        tracing::info!(
            generation,
            source = self.source.name(),
            "Generating recommendations"
        );

        let outcome = self.source.generate(&normalized).await;

        let mut state = self.state.write().await;
        if generation != self.latest_generation.load(Ordering::SeqCst) {
            tracing::debug!(
                generation,
                latest = self.latest_generation.load(Ordering::SeqCst),
                "Discarding stale recommendation result"
            );
            return state.snapshot();
        }

        match outcome {
            Ok(recommendations) => {
                tracing::info!(
                    generation,
                    total = recommendations.len(),
                    "Recommendations generated"
                );
                state.recommendations = recommendations;
                state.generation = generation;
                state.updated_at = Some(Utc::now());
                state.error = None;
            }
            Err(e) => {
                tracing::error!(generation, error = %e, "Error generating recommendations");
                state.error = Some(GENERATION_FAILED_MESSAGE.to_string());
            }
        }
        state.loading = false;

        state.snapshot()
    }

    /// Reruns the pipeline, replacing the previous result entirely
    ///
    /// Uses `preferences` when given, otherwise the profile of the last run,
    /// otherwise an empty profile.
    pub async fn refresh(&self, preferences: Option<UserPreferences>) -> EngineSnapshot {
        let preferences = match preferences {
            Some(p) => p,
            None => self
                .state
                .read()
                .await
                .last_preferences
                .clone()
                .unwrap_or_default(),
        };

        self.get_recommendations(preferences).await
    }

    /// Current state without triggering a run
    pub async fn snapshot(&self) -> EngineSnapshot {
        self.state.read().await.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::{Category, Recommendation, SkinType},
        services::{
            catalog::Catalog,
            sources::{CatalogSource, MockRecommendationSource},
        },
    };
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn catalog_engine() -> RecommendationEngine {
        let source = CatalogSource::new(Arc::new(Catalog::builtin()), Duration::from_millis(1000));
        RecommendationEngine::new(Arc::new(source))
    }

    fn single(id: &str) -> RecommendationSet {
        let mut set = RecommendationSet::empty();
        set.insert(
            Category::Mental,
            vec![Arc::new(Recommendation::new(id, Category::Mental, id, ""))],
        );
        set
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_snapshot_is_loading() {
        let engine = catalog_engine();
        let snapshot = engine.snapshot().await;
        assert!(snapshot.loading);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.generation, 0);
        assert!(snapshot.recommendations.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_recommendations_populates_state() {
        let engine = catalog_engine();
        let snapshot = engine
            .get_recommendations(UserPreferences::new().with_skin_type(SkinType::Oily))
            .await;

        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.generation, 1);
        assert!(snapshot.updated_at.is_some());
        assert_eq!(snapshot.recommendations.get(Category::Skincare)[0].id, "s2");
        assert_eq!(engine.snapshot().await, snapshot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_reuses_last_profile() {
        let engine = catalog_engine();
        engine
            .get_recommendations(UserPreferences::new().with_skin_type(SkinType::Oily))
            .await;

        let refreshed = engine.refresh(None).await;
        assert_eq!(refreshed.generation, 2);
        assert_eq!(refreshed.recommendations.get(Category::Skincare)[0].id, "s2");

        let replaced = engine
            .refresh(Some(UserPreferences::new().with_skin_type(SkinType::Dry)))
            .await;
        assert_eq!(replaced.generation, 3);
        assert_eq!(replaced.recommendations.get(Category::Skincare)[0].id, "s1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_without_history_uses_empty_profile() {
        let engine = catalog_engine();
        let snapshot = engine.refresh(None).await;
        assert_eq!(snapshot.recommendations.get(Category::Skincare)[0].id, "s1");
    }

    #[tokio::test]
    async fn test_failure_becomes_error_message_and_keeps_previous_result() {
        let mut mock = MockRecommendationSource::new();
        let mut calls = 0;
        mock.expect_generate().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(single("first"))
            } else {
                Err(AppError::GenerationFailed("model unavailable".to_string()))
            }
        });
        mock.expect_name().return_const("mock");

        let engine = RecommendationEngine::new(Arc::new(mock));
        let first = engine.get_recommendations(UserPreferences::new()).await;
        assert!(first.error.is_none());

        let second = engine.refresh(None).await;
        assert!(!second.loading);
        assert_eq!(second.error.as_deref(), Some(GENERATION_FAILED_MESSAGE));
        assert_eq!(second.generation, 1);
        assert_eq!(second.recommendations.get(Category::Mental)[0].id, "first");
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let mut mock = MockRecommendationSource::new();
        let mut calls = 0;
        mock.expect_generate().returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(AppError::Internal("boom".to_string()))
            } else {
                Ok(single("second"))
            }
        });
        mock.expect_name().return_const("mock");

        let engine = RecommendationEngine::new(Arc::new(mock));
        let failed = engine.get_recommendations(UserPreferences::new()).await;
        assert!(failed.error.is_some());
        assert!(failed.recommendations.is_empty());

        let recovered = engine.refresh(None).await;
        assert!(recovered.error.is_none());
        assert_eq!(recovered.recommendations.get(Category::Mental)[0].id, "second");
    }

    /// Source whose first call blocks until released, to force overlapping runs
    struct GatedSource {
        gate: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
        calls: AtomicU64,
    }

    #[async_trait::async_trait]
    impl RecommendationSource for GatedSource {
        async fn generate(
            &self,
            _preferences: &crate::models::NormalizedPreferences,
        ) -> crate::error::AppResult<RecommendationSet> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == 1 {
                let gate = self.gate.lock().await.take();
                if let Some(rx) = gate {
                    let _ = rx.await;
                }
                Ok(single("stale"))
            } else {
                Ok(single("fresh"))
            }
        }

        fn name(&self) -> &'static str {
            "gated"
        }
    }

    #[tokio::test]
    async fn test_stale_result_does_not_overwrite_newer_one() {
        let (release, gate) = oneshot::channel();
        let source = Arc::new(GatedSource {
            gate: tokio::sync::Mutex::new(Some(gate)),
            calls: AtomicU64::new(0),
        });
        let engine = Arc::new(RecommendationEngine::new(source.clone()));

        let slow = {
            let engine = engine.clone();
            tokio::spawn(async move { engine.get_recommendations(UserPreferences::new()).await })
        };

        // wait until the slow run has entered the source
        while source.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let fresh = engine.get_recommendations(UserPreferences::new()).await;
        assert_eq!(fresh.generation, 2);
        assert_eq!(fresh.recommendations.get(Category::Mental)[0].id, "fresh");

        release.send(()).ok();
        let stale = slow.await.unwrap();

        assert_eq!(stale.generation, 2);
        assert_eq!(stale.recommendations.get(Category::Mental)[0].id, "fresh");
        let current = engine.snapshot().await;
        assert_eq!(current.recommendations.get(Category::Mental)[0].id, "fresh");
        assert!(!current.loading);
    }

    /// Source that echoes the mood back as the record id
    struct EchoSource;

    #[async_trait::async_trait]
    impl RecommendationSource for EchoSource {
        async fn generate(
            &self,
            preferences: &crate::models::NormalizedPreferences,
        ) -> crate::error::AppResult<RecommendationSet> {
            tokio::task::yield_now().await;
            Ok(single(preferences.mood.as_deref().unwrap_or("none")))
        }

        fn name(&self) -> &'static str {
            "echo"
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_runs_leave_latest_profile_behind() {
        let engine = Arc::new(RecommendationEngine::new(Arc::new(EchoSource)));

        let runs: Vec<_> = (0..32)
            .map(|i| {
                let engine = engine.clone();
                tokio::spawn(async move {
                    engine
                        .get_recommendations(UserPreferences::new().with_mood(format!("mood-{}", i)))
                        .await
                })
            })
            .collect();
        for run in runs {
            run.await.unwrap();
        }

        let settled = engine.snapshot().await;
        assert!(!settled.loading);
        assert_eq!(settled.generation, 32);

        // the profile kept for refresh belongs to the run whose result is shown
        let shown = settled.recommendations.get(Category::Mental)[0].id.clone();
        let refreshed = engine.refresh(None).await;
        assert_eq!(refreshed.recommendations.get(Category::Mental)[0].id, shown);
    }
}
