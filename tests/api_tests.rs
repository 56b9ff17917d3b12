use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use glow_api::{
    api::{create_router, AppState},
    config::Config,
    services::Catalog,
};

fn create_test_server() -> TestServer {
    let state = AppState::new(&Config::without_latency(), Arc::new(Catalog::builtin()));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn ids(snapshot: &Value, category: &str) -> Vec<String> {
    snapshot["recommendations"][category]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = create_test_server();
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    let value = header.to_str().unwrap();
    assert!(uuid::Uuid::parse_str(value).is_ok());
}

#[tokio::test]
async fn test_incoming_request_id_is_reused() {
    let server = create_test_server();
    let id = uuid::Uuid::new_v4().to_string();
    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_str(&id).unwrap(),
        )
        .await;
    assert_eq!(response.header("x-request-id").to_str().unwrap(), id);
}

#[tokio::test]
async fn test_snapshot_before_first_run_is_loading() {
    let server = create_test_server();
    let response = server.get("/api/v1/recommendations").await;
    response.assert_status_ok();

    let snapshot: Value = response.json();
    assert_eq!(snapshot["loading"], true);
    assert_eq!(snapshot["generation"], 0);
    assert!(snapshot["error"].is_null());
}

#[tokio::test]
async fn test_recommendations_for_oily_skin() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "skin_type": "oily" }))
        .await;
    response.assert_status_ok();

    let snapshot: Value = response.json();
    assert_eq!(snapshot["loading"], false);
    assert_eq!(snapshot["generation"], 1);
    assert_eq!(ids(&snapshot, "skincare"), vec!["s2", "s3"]);
    for category in ["skincare", "fitness", "mental", "style", "nutrition"] {
        assert!(snapshot["recommendations"][category].as_array().unwrap().len() <= 3);
    }
}

#[tokio::test]
async fn test_empty_profile_fills_every_category() {
    let server = create_test_server();
    let response = server.post("/api/v1/recommendations").json(&json!({})).await;
    response.assert_status_ok();

    let snapshot: Value = response.json();
    assert_eq!(ids(&snapshot, "skincare"), vec!["s1", "s2", "s3"]);
    assert_eq!(ids(&snapshot, "fitness"), vec!["f1", "f2", "f3"]);
    assert_eq!(ids(&snapshot, "mental").len(), 3);
}

#[tokio::test]
async fn test_luteal_phase_leads_mental() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "cycle_phase": "luteal" }))
        .await;

    let snapshot: Value = response.json();
    assert_eq!(ids(&snapshot, "mental")[0], "m3");
}

#[tokio::test]
async fn test_refresh_without_body_reuses_profile() {
    let server = create_test_server();
    server
        .post("/api/v1/recommendations")
        .json(&json!({ "skin_type": "dry" }))
        .await
        .assert_status_ok();

    let response = server.post("/api/v1/recommendations/refresh").await;
    response.assert_status_ok();
    let snapshot: Value = response.json();
    assert_eq!(snapshot["generation"], 2);
    assert_eq!(ids(&snapshot, "skincare")[0], "s1");

    let current: Value = server.get("/api/v1/recommendations").await.json();
    assert_eq!(current, snapshot);
}

#[tokio::test]
async fn test_refresh_with_new_profile_replaces_result() {
    let server = create_test_server();
    server
        .post("/api/v1/recommendations")
        .json(&json!({ "skin_type": "dry" }))
        .await;

    let response = server
        .post("/api/v1/recommendations/refresh")
        .json(&json!({ "skin_type": "oily" }))
        .await;
    let snapshot: Value = response.json();
    assert_eq!(ids(&snapshot, "skincare"), vec!["s2", "s3"]);
}

#[tokio::test]
async fn test_invalid_profile_is_rejected() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "skin_type": "scaly" }))
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_personalized_recommendations() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations/personalized")
        .json(&json!({
            "skin_type": "combination",
            "fitness_level": "intermediate",
            "mental_focus": ["anxiety", "sleep"],
            "cycle_phase": "follicular",
            "mood": "energetic"
        }))
        .await;
    response.assert_status_ok();

    let snapshot: Value = response.json();
    let skincare = snapshot["recommendations"]["skincare"].as_array().unwrap();
    assert_eq!(skincare.len(), 2);
    assert_eq!(skincare[0]["title"], "AI Routine for Combination Skin");
    assert_eq!(skincare[0]["ai_generated"], true);
    assert_eq!(
        snapshot["recommendations"]["mental"][0]["title"],
        "AI Anxiety Support"
    );

    let refreshed: Value = server
        .post("/api/v1/recommendations/personalized/refresh")
        .await
        .json();
    assert_eq!(refreshed["generation"], 2);
    assert_eq!(refreshed["recommendations"], snapshot["recommendations"]);
}

#[tokio::test]
async fn test_get_personalized_snapshot() {
    let server = create_test_server();
    let initial: Value = server.get("/api/v1/recommendations/personalized").await.json();
    assert_eq!(initial["loading"], true);
    assert_eq!(initial["generation"], 0);

    let created: Value = server
        .post("/api/v1/recommendations/personalized")
        .json(&json!({ "skin_type": "dry" }))
        .await
        .json();

    let response = server.get("/api/v1/recommendations/personalized").await;
    response.assert_status_ok();
    let current: Value = response.json();
    assert_eq!(current, created);
    assert_eq!(current["generation"], 1);
    assert_eq!(current["loading"], false);
}

#[tokio::test]
async fn test_engines_are_independent() {
    let server = create_test_server();
    server
        .post("/api/v1/recommendations/personalized")
        .json(&json!({}))
        .await;

    let catalog: Value = server.get("/api/v1/recommendations").await.json();
    assert_eq!(catalog["generation"], 0);
}

#[tokio::test]
async fn test_routine_suggestions() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/routines/suggestions")
        .json(&json!({ "goals": ["Morning cleanse", "read 10-30 mins"] }))
        .await;
    response.assert_status_ok();

    let suggestions: Vec<Value> = response.json();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0]["title"], "Morning Skincare Routine");
    assert_eq!(suggestions[0]["reminder_time"], "07:00");
    assert_eq!(suggestions[1]["duration_minutes"], 20);
}

#[tokio::test]
async fn test_routine_suggestions_too_many_goals() {
    let server = create_test_server();
    let goals: Vec<String> = (0..21).map(|i| format!("goal {}", i)).collect();
    let response = server
        .post("/api/v1/routines/suggestions")
        .json(&json!({ "goals": goals }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("20"));
}
