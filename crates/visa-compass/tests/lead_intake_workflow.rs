//! Integration checks for the consultation application form endpoint.

use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use visa_compass::workflows::leads::{
    lead_router, LeadEnvelope, LeadService, LeadSink, LeadSinkError,
};

#[derive(Default, Clone)]
struct RecordingSink {
    envelopes: Arc<Mutex<Vec<LeadEnvelope>>>,
}

impl LeadSink for RecordingSink {
    fn forward(&self, envelope: LeadEnvelope) -> Result<(), LeadSinkError> {
        self.envelopes.lock().expect("lock").push(envelope);
        Ok(())
    }
}

fn form() -> Value {
    json!({
        "fullName": " Mei Lin ",
        "email": "mei.lin@example.com",
        "phone": "+61 2 5550 1234",
        "dateOfBirth": "1995-07-21",
        "nationality": "Chinese",
        "currentLocation": "Shenzhen",
        "education": "master",
        "fieldOfStudy": "Data Science",
        "experience": "3-5",
        "occupation": "Analyst",
        "skills": "Python, SQL",
        "languages": ["Mandarin", "English"],
        "destination": "New Zealand",
        "purpose": "work",
        "timeline": "3-6months",
        "terms": true,
        "privacy": true
    })
}

async fn post(router: axum::Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/leads")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    (status, serde_json::from_slice(&body).expect("json"))
}

#[tokio::test]
async fn accepted_form_is_forwarded_with_trimmed_fields() {
    let sink = Arc::new(RecordingSink::default());
    let router = lead_router(Arc::new(LeadService::new(sink.clone())));

    let (status, payload) = post(router, form()).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(payload["reference"], "lead-000001");
    assert_eq!(payload["status"], "received");

    let envelopes = sink.envelopes.lock().expect("lock").clone();
    assert_eq!(envelopes.len(), 1);
    assert_eq!(envelopes[0].application.full_name, "Mei Lin");
    assert_eq!(envelopes[0].application.additional_info, None);
}

#[tokio::test]
async fn unchecked_consent_boxes_are_reported() {
    let sink = Arc::new(RecordingSink::default());
    let router = lead_router(Arc::new(LeadService::new(sink.clone())));
    let mut body = form();
    body["terms"] = json!(false);
    body["privacy"] = json!(false);

    let (status, payload) = post(router, body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = payload["violations"]
        .as_array()
        .expect("violations")
        .iter()
        .filter_map(|violation| violation["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["terms", "privacy"]);
    assert!(sink.envelopes.lock().expect("lock").is_empty());
}
