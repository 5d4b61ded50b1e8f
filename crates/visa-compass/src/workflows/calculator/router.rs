use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::intake::{WizardDraft, WizardStep};
use super::progress::{ProgressStore, SessionId};
use super::service::{CalculatorService, CalculatorServiceError};
use crate::error::AppError;

/// Payload submitted when the user finishes the last wizard step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub answers: WizardDraft,
}

/// Autosave payload sent whenever the wizard changes step.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    pub step: WizardStep,
    #[serde(default)]
    pub answers: WizardDraft,
}

/// Router builder exposing the visa probability calculator.
pub fn calculator_router<P>(service: Arc<CalculatorService<P>>) -> Router
where
    P: ProgressStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/calculator/assessments",
            post(assessment_handler::<P>),
        )
        .route(
            "/api/v1/calculator/steps/:step/validate",
            post(step_validation_handler::<P>),
        )
        .route(
            "/api/v1/calculator/progress/:session_id",
            put(save_progress_handler::<P>)
                .get(restore_progress_handler::<P>)
                .delete(discard_progress_handler::<P>),
        )
        .with_state(service)
}

pub(crate) async fn assessment_handler<P>(
    State(service): State<Arc<CalculatorService<P>>>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Response
where
    P: ProgressStore + 'static,
{
    let delay = service.processing_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let outcome = match request.session_id {
        Some(session) => service.assess_session(&SessionId(session), &request.answers),
        None => service.assess(&request.answers),
    };

    match outcome {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn step_validation_handler<P>(
    State(service): State<Arc<CalculatorService<P>>>,
    Path(step): Path<u8>,
    axum::Json(draft): axum::Json<WizardDraft>,
) -> Response
where
    P: ProgressStore + 'static,
{
    let step = match WizardStep::try_from(step) {
        Ok(step) => step,
        Err(message) => {
            return (StatusCode::NOT_FOUND, axum::Json(json!({ "error": message })))
                .into_response()
        }
    };

    match service.validate_step(step, &draft) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_progress_handler<P>(
    State(service): State<Arc<CalculatorService<P>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<ProgressRequest>,
) -> Response
where
    P: ProgressStore + 'static,
{
    let session = SessionId(session_id);
    match service.save_progress(&session, request.answers, request.step, Utc::now()) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn restore_progress_handler<P>(
    State(service): State<Arc<CalculatorService<P>>>,
    Path(session_id): Path<String>,
) -> Response
where
    P: ProgressStore + 'static,
{
    let session = SessionId(session_id);
    match service.restore_progress(&session, Utc::now()) {
        Ok(Some(saved)) => (StatusCode::OK, axum::Json(saved)).into_response(),
        Ok(None) => {
            let payload = json!({
                "session_id": session.0,
                "error": "no saved progress",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn discard_progress_handler<P>(
    State(service): State<Arc<CalculatorService<P>>>,
    Path(session_id): Path<String>,
) -> Response
where
    P: ProgressStore + 'static,
{
    match service.discard_progress(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: CalculatorServiceError) -> Response {
    AppError::from(error).into_response()
}
