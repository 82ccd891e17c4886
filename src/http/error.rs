//! Mapping of board failures onto HTTP responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use super::responses::ErrorResponse;
use crate::board::services::{ErrorKind, TaskTrackerError};

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request is malformed or misses a required field.
    #[error("{0}")]
    Validation(String),

    /// The addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request is well formed but carries an unacceptable value.
    #[error("{0}")]
    Unprocessable(String),

    /// The board or its store rejected the operation.
    #[error(transparent)]
    Tracker(#[from] TaskTrackerError),
}

impl ApiError {
    /// Returns the status code sent for this error.
    ///
    /// Unknown users or tasks referenced inside an operation are reported as
    /// unprocessable; only direct lookups produce `404`.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Tracker(err) => match err.kind() {
                ErrorKind::NotFound | ErrorKind::ConstraintViolation => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// A task id segment that is not an unsigned integer matches no resource.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::NotFound(format!("resource not found: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "request failed");
            "internal server error".to_owned()
        } else {
            self.to_string()
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
