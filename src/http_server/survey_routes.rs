//! Public survey routes
//!
//! `POST /submit` admits one response; `GET /data` returns the cohort
//! statistics.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{debug, info};

use super::errors::ApiError;
use crate::auth::CaptchaVerifier;
use crate::observability::Event;
use crate::stats::{Aggregator, CohortStats};
use crate::store::SurveyStore;
use crate::survey::{validate_submission, NewSurvey, RawSubmission, SubmissionError};

/// State shared by the public handlers
pub struct SurveyState {
    pub store: SurveyStore,
    pub captcha: Arc<dyn CaptchaVerifier>,
    pub aggregator: Aggregator,
}

impl SurveyState {
    pub fn new(store: SurveyStore, captcha: Arc<dyn CaptchaVerifier>) -> Self {
        Self {
            store,
            captcha,
            aggregator: Aggregator::default(),
        }
    }
}

pub fn survey_routes(state: Arc<SurveyState>) -> Router {
    Router::new()
        .route("/submit", post(submit_handler))
        .route("/data", get(data_handler))
        .with_state(state)
}

/// CAPTCHA first, then field validation, then a single insert.
async fn submit_handler(
    State(state): State<Arc<SurveyState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let raw = match body {
        Ok(Json(value)) => RawSubmission::from_value(value),
        Err(rejection) => {
            debug!(reason = %rejection, "unreadable submission body");
            RawSubmission::default()
        }
    };

    let record = match admit(&state, &raw).await {
        Ok(record) => record,
        Err(e) => {
            info!(event = Event::SubmissionRejected.as_str(), reason = e.kind(), "submission rejected");
            return Err(e.into());
        }
    };

    let id = state.store.insert(&record).await?;
    info!(event = Event::SubmissionAccepted.as_str(), id, "submission accepted");
    Ok(StatusCode::OK)
}

async fn admit(
    state: &SurveyState,
    raw: &RawSubmission,
) -> Result<NewSurvey, SubmissionError> {
    if !state.captcha.verify(raw.captcha_token()).await {
        return Err(SubmissionError::CaptchaFailed);
    }
    validate_submission(raw)
}

async fn data_handler(State(state): State<Arc<SurveyState>>) -> Result<Json<CohortStats>, ApiError> {
    let samples = state.store.samples().await?;
    Ok(Json(state.aggregator.aggregate(&samples)))
}
