use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{RoutineSuggestion, UserPreferences},
    services::engine::{EngineSnapshot, RecommendationEngine},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RoutineSuggestionRequest {
    pub goals: Vec<String>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

async fn run(
    engine: &RecommendationEngine,
    request_id: RequestId,
    preferences: UserPreferences,
) -> Json<EngineSnapshot> {
    tracing::info!(
        request_id = %request_id,
        source = engine.source_name(),
        "Processing recommendation request"
    );
    Json(engine.get_recommendations(preferences).await)
}

async fn rerun(
    engine: &RecommendationEngine,
    request_id: RequestId,
    preferences: Option<UserPreferences>,
) -> Json<EngineSnapshot> {
    tracing::info!(
        request_id = %request_id,
        source = engine.source_name(),
        with_profile = preferences.is_some(),
        "Refreshing recommendations"
    );
    Json(engine.refresh(preferences).await)
}

/// Current catalog recommendations with loading and error flags
pub async fn get_recommendations(State(state): State<AppState>) -> Json<EngineSnapshot> {
    Json(state.recommendations.snapshot().await)
}

/// Run catalog recommendations for a profile
pub async fn create_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(preferences): Json<UserPreferences>,
) -> Json<EngineSnapshot> {
    run(&state.recommendations, request_id, preferences).await
}

/// Rerun catalog recommendations, optionally with a new profile
pub async fn refresh_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    preferences: Option<Json<UserPreferences>>,
) -> Json<EngineSnapshot> {
    rerun(
        &state.recommendations,
        request_id,
        preferences.map(|Json(p)| p),
    )
    .await
}

/// Current personalized recommendations
pub async fn get_personalized(State(state): State<AppState>) -> Json<EngineSnapshot> {
    Json(state.personalized.snapshot().await)
}

/// Run personalized recommendations for a profile
pub async fn create_personalized(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(preferences): Json<UserPreferences>,
) -> Json<EngineSnapshot> {
    run(&state.personalized, request_id, preferences).await
}

/// Rerun personalized recommendations, optionally with a new profile
pub async fn refresh_personalized(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    preferences: Option<Json<UserPreferences>>,
) -> Json<EngineSnapshot> {
    rerun(&state.personalized, request_id, preferences.map(|Json(p)| p)).await
}

/// Suggest daily routine items from free-text goals
pub async fn suggest_routines(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RoutineSuggestionRequest>,
) -> AppResult<Json<Vec<RoutineSuggestion>>> {
    tracing::info!(
        request_id = %request_id,
        goal_count = request.goals.len(),
        "Processing routine suggestion request"
    );

    let suggestions = state.routines.suggest(&request.goals).await?;
    Ok(Json(suggestions))
}
