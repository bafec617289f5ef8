//! HTTP error mapping
//!
//! Every failure leaves the service as a plain-text body. Validation
//! reasons are returned verbatim; storage faults are logged and reduced to
//! a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::observability::Event;
use crate::store::StoreError;
use crate::survey::SubmissionError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid delete request")]
    InvalidDeleteRequest,

    #[error("Internal server error")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Submission(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidDeleteRequest => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(ref e) = self {
            error!(event = Event::StoreFailure.as_str(), error = %e, "storage fault");
        }
        (self.status(), self.to_string()).into_response()
    }
}
