//! Admin HTTP Routes
//!
//! Record listing and bulk deletion. Both check the admin credential before
//! looking at anything else in the request.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::errors::ApiError;
use crate::auth::AdminGate;
use crate::observability::Event;
use crate::store::SurveyStore;
use crate::survey::SurveyRecord;

pub struct AdminState {
    pub store: SurveyStore,
    pub gate: AdminGate,
}

impl AdminState {
    pub fn new(store: SurveyStore, gate: AdminGate) -> Self {
        Self { store, gate }
    }

    fn authorize(&self, headers: &HeaderMap, query: &AdminQuery, action: &str) -> Result<(), ApiError> {
        if self.gate.authorize(headers, query.admin_key.as_deref()) {
            Ok(())
        } else {
            warn!(event = Event::AdminDenied.as_str(), action, "admin credential rejected");
            Err(ApiError::Unauthorized)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    #[serde(default)]
    pub admin_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: Vec<i64>,
}

pub fn admin_routes(state: Arc<AdminState>) -> Router {
    Router::new()
        .route("/records", get(list_records_handler))
        .route("/delete", post(delete_records_handler))
        .with_state(state)
}

async fn list_records_handler(
    State(state): State<Arc<AdminState>>,
    headers: HeaderMap,
    query: Option<Query<AdminQuery>>,
) -> Result<Json<Vec<SurveyRecord>>, ApiError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    state.authorize(&headers, &query, "list")?;

    let records = state.store.list().await?;
    info!(event = Event::RecordsListed.as_str(), count = records.len(), "records listed");
    Ok(Json(records))
}

/// Extracts `ids` from a delete body: must be an array of integers.
fn parse_delete_ids(body: &Value) -> Result<Vec<i64>, ApiError> {
    body.get("ids")
        .and_then(Value::as_array)
        .ok_or(ApiError::InvalidDeleteRequest)?
        .iter()
        .map(|v| v.as_i64().ok_or(ApiError::InvalidDeleteRequest))
        .collect()
}

/// Deletes the listed ids and echoes the request list back, whether or not
/// each id existed.
async fn delete_records_handler(
    State(state): State<Arc<AdminState>>,
    headers: HeaderMap,
    query: Option<Query<AdminQuery>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    state.authorize(&headers, &query, "delete")?;

    let Ok(Json(body)) = body else {
        return Err(ApiError::InvalidDeleteRequest);
    };
    let ids = parse_delete_ids(&body)?;

    let removed = state.store.delete(&ids).await?;
    info!(
        event = Event::RecordsDeleted.as_str(),
        requested = ids.len(),
        removed,
        "records deleted"
    );
    Ok(Json(DeleteResponse { deleted: ids }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_delete_ids() {
        assert_eq!(parse_delete_ids(&json!({"ids": [1, 2, 999]})).unwrap(), vec![1, 2, 999]);
        assert_eq!(parse_delete_ids(&json!({"ids": []})).unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_parse_delete_ids_rejects_malformed() {
        for body in [
            json!({}),
            json!({"ids": 5}),
            json!({"ids": "1,2"}),
            json!({"ids": [1, "2"]}),
            json!({"ids": [1.5]}),
            json!([1, 2]),
        ] {
            assert!(matches!(
                parse_delete_ids(&body),
                Err(ApiError::InvalidDeleteRequest)
            ));
        }
    }
}
