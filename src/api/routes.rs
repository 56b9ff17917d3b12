use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog recommendations
        .route(
            "/recommendations",
            get(handlers::get_recommendations).post(handlers::create_recommendations),
        )
        .route(
            "/recommendations/refresh",
            post(handlers::refresh_recommendations),
        )
        // Personalized recommendations
        .route(
            "/recommendations/personalized",
            get(handlers::get_personalized).post(handlers::create_personalized),
        )
        .route(
            "/recommendations/personalized/refresh",
            post(handlers::refresh_personalized),
        )
        // Routines
        .route("/routines/suggestions", post(handlers::suggest_routines))
}
