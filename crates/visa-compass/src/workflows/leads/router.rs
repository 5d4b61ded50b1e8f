use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::LeadApplication;
use super::service::{LeadService, LeadServiceError, LeadSink};

pub fn lead_router<S>(service: Arc<LeadService<S>>) -> Router
where
    S: LeadSink + 'static,
{
    Router::new()
        .route("/api/v1/leads", post(submit_lead_handler::<S>))
        .with_state(service)
}

pub(crate) async fn submit_lead_handler<S>(
    State(service): State<Arc<LeadService<S>>>,
    axum::Json(application): axum::Json<LeadApplication>,
) -> Response
where
    S: LeadSink + 'static,
{
    match service.submit(application, Utc::now()) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(LeadServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "violations": error.violations,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(LeadServiceError::Sink(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
