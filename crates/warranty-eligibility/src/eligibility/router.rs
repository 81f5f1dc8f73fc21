use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::answers::{AnswerField, AnswerSnapshot};
use super::evaluation::{EligibilityEngine, EvaluationPolicy, ReasonCode};
use super::outcome::EligibilityOutcome;
use super::steps::StepDefinition;

/// Router exposing the evaluation endpoints over a shared engine.
pub fn eligibility_router(engine: Arc<EligibilityEngine>) -> Router {
    Router::new()
        .route("/api/v1/eligibility/evaluate", post(evaluate_handler))
        .route("/api/v1/eligibility/missing", post(missing_handler))
        .route("/api/v1/eligibility/early-exit", post(early_exit_handler))
        .route("/api/v1/eligibility/steps", get(steps_handler))
        .with_state(engine)
}

#[derive(Debug, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub answers: Option<AnswerSnapshot>,
    #[serde(default)]
    pub policy: Option<EvaluationPolicy>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct EarlyExitRequest {
    #[serde(default)]
    pub answers: AnswerSnapshot,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessView {
    pub missing_fields: Vec<AnswerField>,
    pub complete: bool,
}

#[derive(Debug, Serialize)]
pub struct EarlyExitView {
    pub reason: Option<ReasonCode>,
}

pub(crate) async fn evaluate_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    Json(request): Json<EvaluationRequest>,
) -> Json<EligibilityOutcome> {
    let policy = request.policy.unwrap_or(engine.config().policy);
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    Json(engine.evaluate_optional(request.answers.as_ref(), policy, today))
}

pub(crate) async fn missing_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    Json(answers): Json<AnswerSnapshot>,
) -> Json<CompletenessView> {
    let missing_fields = engine.missing_fields(&answers);
    Json(CompletenessView {
        complete: missing_fields.is_empty(),
        missing_fields,
    })
}

pub(crate) async fn early_exit_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    Json(request): Json<EarlyExitRequest>,
) -> Json<EarlyExitView> {
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    let reason = engine.early_exit(&request.answers, today);
    Json(EarlyExitView { reason })
}

pub(crate) async fn steps_handler(
    State(engine): State<Arc<EligibilityEngine>>,
) -> Json<Vec<StepDefinition>> {
    Json(engine.blueprint().steps().to_vec())
}
