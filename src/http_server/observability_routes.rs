//! Observability HTTP Routes
//!
//! Liveness and a store reachability probe.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::observability::Event;
use crate::store::SurveyStore;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub records: Option<i64>,
}

pub fn health_routes(store: SurveyStore) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .with_state(Arc::new(store))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// 200 when the store answers a count query, 503 otherwise.
async fn ready_handler(State(store): State<Arc<SurveyStore>>) -> impl IntoResponse {
    match store.count().await {
        Ok(count) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ready".to_string(),
                records: Some(count),
            }),
        ),
        Err(e) => {
            warn!(event = Event::StoreFailure.as_str(), error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    status: "unavailable".to_string(),
                    records: None,
                }),
            )
        }
    }
}
