use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::calculator::intake::{WizardDraft, WizardStep};
use crate::workflows::calculator::progress::InMemoryProgressStore;
use crate::workflows::calculator::router::{calculator_router, restore_progress_handler};
use crate::workflows::calculator::{CalculatorConfig, CalculatorService};

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn app() -> (Router, Arc<InMemoryProgressStore>) {
    let (service, store) = build_service();
    (calculator_router(Arc::new(service)), store)
}

fn draft_json() -> Value {
    serde_json::to_value(draft_from(&strong_profile())).expect("draft serializes")
}

#[tokio::test]
async fn assessment_route_returns_scored_result() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/calculator/assessments",
            json!({ "answers": draft_json() }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["result"]["totalScore"], 97);
    assert_eq!(body["result"]["probability"], "high");
    assert_eq!(body["result"]["categoryScores"]["education"], 32);
    assert_eq!(body["recommendations"][0]["kind"], "book_consultation");
    assert_eq!(body["recommendations"][0]["priority"], "high");
}

#[tokio::test]
async fn assessment_route_reports_violations() {
    let (app, _) = app();
    let mut answers = draft_json();
    answers["age"] = json!(16);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/calculator/assessments",
            json!({ "answers": answers }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["violations"][0]["field"], "age");
    assert_eq!(body["violations"][0]["message"], "Must be at least 18");
}

#[tokio::test]
async fn assessment_with_session_clears_saved_progress() {
    let (service, store) = build_service();
    let service = Arc::new(service);
    service
        .save_progress(
            &session("tab-1"),
            draft_from(&strong_profile()),
            WizardStep::FinancialTimeline,
            Utc::now(),
        )
        .expect("save succeeds");

    let response = calculator_router(service)
        .oneshot(json_request(
            Method::POST,
            "/api/v1/calculator/assessments",
            json!({ "sessionId": "tab-1", "answers": draft_json() }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.is_empty());
}

#[tokio::test]
async fn step_validation_route_accepts_valid_step() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/calculator/steps/0/validate",
            json!({
                "currentCountry": "Nigeria",
                "citizenship": "Nigerian",
                "targetCountry": "Canada",
                "age": 31,
                "maritalStatus": "married",
                "hasDependents": true,
                "dependentsCount": 1
            }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn step_validation_route_rejects_missing_fields() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/calculator/steps/3/validate",
            json!({ "financialResources": "15k-30k" }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    let fields: Vec<&str> = body["violations"]
        .as_array()
        .expect("violations array")
        .iter()
        .filter_map(|violation| violation["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["timeline", "hasFamilyInTarget"]);
}

#[tokio::test]
async fn step_validation_route_returns_not_found_for_unknown_step() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/calculator/steps/9/validate",
            json!({}),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn progress_routes_save_restore_and_discard() {
    let (app, store) = app();
    let uri = "/api/v1/calculator/progress/tab-2";

    let saved = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            uri,
            json!({ "step": 1, "answers": { "targetCountry": "Australia", "age": 33 } }),
        ))
        .await
        .expect("route responds");
    assert_eq!(saved.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.len(), 1);

    let restored = app
        .clone()
        .oneshot(empty_request(Method::GET, uri))
        .await
        .expect("route responds");
    assert_eq!(restored.status(), StatusCode::OK);
    let body = read_json_body(restored).await;
    assert_eq!(body["step"], 1);
    assert_eq!(body["draft"]["targetCountry"], "Australia");
    assert!(body["savedAt"].is_string());

    let discarded = app
        .clone()
        .oneshot(empty_request(Method::DELETE, uri))
        .await
        .expect("route responds");
    assert_eq!(discarded.status(), StatusCode::NO_CONTENT);

    let missing = app
        .oneshot(empty_request(Method::GET, uri))
        .await
        .expect("route responds");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn restore_handler_reports_missing_session() {
    let (service, _) = build_service();

    let response = restore_progress_handler(
        State(Arc::new(service)),
        Path("never-saved".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["session_id"], "never-saved");
    assert_eq!(body["error"], "no saved progress");
}

#[tokio::test]
async fn store_failures_map_to_internal_error() {
    let service = CalculatorService::new(
        Arc::new(UnavailableProgressStore),
        CalculatorConfig::default(),
    );
    let app = calculator_router(Arc::new(service));

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/calculator/progress/tab-3",
            json!({ "step": 0, "answers": { "age": 40 } }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "progress store unavailable: redis down");
}

#[tokio::test]
async fn empty_autosave_is_accepted_without_storing() {
    let (app, store) = app();

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/calculator/progress/tab-4",
            json!({ "step": 0, "answers": WizardDraft::default() }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(store.is_empty());
}

#[tokio::test]
async fn out_of_range_numbers_return_field_violations() {
    let (app, _) = app();
    let mut answers = draft_json();
    answers["age"] = json!(300);
    answers["yearsOfExperience"] = json!(-1);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/calculator/assessments",
            json!({ "answers": answers }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["violations"][0]["field"], "age");
    assert_eq!(body["violations"][0]["message"], "Invalid age");
    assert_eq!(body["violations"][1]["field"], "yearsOfExperience");
    assert_eq!(body["violations"][1]["message"], "Invalid experience");
}

#[tokio::test(start_paused = true)]
async fn processing_delay_holds_response_without_changing_result() {
    let store = Arc::new(InMemoryProgressStore::default());
    let config = CalculatorConfig {
        processing_delay_ms: 3_000,
        ..CalculatorConfig::default()
    };
    let service = Arc::new(CalculatorService::new(store, config));
    let app = calculator_router(service.clone());
    let started = tokio::time::Instant::now();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/calculator/assessments",
            json!({ "answers": draft_json() }),
        ))
        .await
        .expect("route responds");

    assert!(started.elapsed() >= std::time::Duration::from_millis(3_000));
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let expected =
        serde_json::to_value(service.evaluate(&strong_profile())).expect("assessment serializes");
    assert_eq!(body, expected);
}
