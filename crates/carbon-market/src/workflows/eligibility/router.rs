use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use super::catalog::{
    max_points, HardFailConditionView, SoftSignalView, HARD_FAIL_CONDITION_LIST, SOFT_SIGNAL_LIST,
};
use super::domain::ProjectEligibilityInput;
use super::{evaluate, EligibilityVerdict};

/// Limits applied to assessment requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentSettings {
    pub max_batch_size: usize,
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            max_batch_size: 100,
        }
    }
}

/// Rejections for batch requests. Individual projects never fail to assess.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentRequestError {
    #[error("batch contains no projects")]
    EmptyBatch,
    #[error("batch of {size} projects exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },
}

impl AssessmentRequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            AssessmentRequestError::EmptyBatch => StatusCode::UNPROCESSABLE_ENTITY,
            AssessmentRequestError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for AssessmentRequestError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.to_string() });
        (self.status(), Json(payload)).into_response()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchAssessmentRequest {
    pub projects: Vec<ProjectEligibilityInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchAssessmentEntry {
    pub index: usize,
    pub verdict: EligibilityVerdict,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAssessmentResponse {
    pub assessments: Vec<BatchAssessmentEntry>,
    pub eligible: usize,
    pub not_recommended: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaResponse {
    pub hard_fail_conditions: &'static [HardFailConditionView],
    pub soft_signals: &'static [SoftSignalView],
    pub max_points: u32,
}

/// Router builder exposing the assessment endpoints.
pub fn eligibility_router(settings: AssessmentSettings) -> Router {
    Router::new()
        .route("/api/v1/eligibility/assessments", post(assess_handler))
        .route(
            "/api/v1/eligibility/assessments/batch",
            post(batch_assess_handler),
        )
        .route("/api/v1/eligibility/criteria", get(criteria_handler))
        .with_state(settings)
}

pub(crate) async fn assess_handler(
    Json(project): Json<ProjectEligibilityInput>,
) -> Json<EligibilityVerdict> {
    let verdict = evaluate(&project);
    log_verdict(None, &verdict);
    Json(verdict)
}

pub(crate) async fn batch_assess_handler(
    State(settings): State<AssessmentSettings>,
    Json(request): Json<BatchAssessmentRequest>,
) -> Result<Json<BatchAssessmentResponse>, AssessmentRequestError> {
    let response = assess_batch(&request.projects, settings).map_err(|err| {
        warn!(%err, "rejected assessment batch");
        err
    })?;

    info!(
        projects = response.assessments.len(),
        eligible = response.eligible,
        not_recommended = response.not_recommended,
        "assessed project batch"
    );
    Ok(Json(response))
}

pub(crate) async fn criteria_handler() -> Json<CriteriaResponse> {
    Json(CriteriaResponse {
        hard_fail_conditions: HARD_FAIL_CONDITION_LIST.as_slice(),
        soft_signals: SOFT_SIGNAL_LIST.as_slice(),
        max_points: max_points(),
    })
}

/// Assesses every project in order, rejecting empty or oversized batches up front.
pub fn assess_batch(
    projects: &[ProjectEligibilityInput],
    settings: AssessmentSettings,
) -> Result<BatchAssessmentResponse, AssessmentRequestError> {
    if projects.is_empty() {
        return Err(AssessmentRequestError::EmptyBatch);
    }
    if projects.len() > settings.max_batch_size {
        return Err(AssessmentRequestError::BatchTooLarge {
            size: projects.len(),
            limit: settings.max_batch_size,
        });
    }

    let assessments: Vec<BatchAssessmentEntry> = projects
        .iter()
        .enumerate()
        .map(|(index, project)| {
            let verdict = evaluate(project);
            log_verdict(Some(index), &verdict);
            BatchAssessmentEntry { index, verdict }
        })
        .collect();

    let eligible = assessments
        .iter()
        .filter(|entry| entry.verdict.is_eligible)
        .count();

    Ok(BatchAssessmentResponse {
        not_recommended: assessments.len() - eligible,
        eligible,
        assessments,
    })
}

fn log_verdict(index: Option<usize>, verdict: &EligibilityVerdict) {
    info!(
        ?index,
        eligible = verdict.is_eligible,
        tier = verdict.confidence_level.label(),
        score = verdict.confidence_score,
        hard_fails = verdict.triggered_hard_fails().count(),
        "assessed project eligibility"
    );
}
