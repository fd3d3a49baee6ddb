//! # Error Handling Middleware
//!
//! Maps `RoutineError` values to HTTP status codes and JSON error bodies so
//! every endpoint reports failures the same way.
//!
//! | Error | Status |
//! |---|---|
//! | `BadRequest` | 400 |
//! | `NotFound` | 404 |
//! | `Validation` | 422, with `code` and the conflicting slot when there is one |
//! | `Storage` | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use routine_core::errors::RoutineError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
#[derive(Debug)]
pub struct AppError(pub RoutineError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            RoutineError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.0.to_string() }),
            ),
            RoutineError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "error": self.0.to_string() }),
            ),
            RoutineError::Validation(violation) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": violation.to_string(),
                    "code": violation.code(),
                    "conflict": violation.conflict(),
                }),
            ),
            RoutineError::Storage(report) => {
                error!("storage failure: {report:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": report.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Allows `?` on `RoutineResult` inside handlers
impl From<RoutineError> for AppError {
    fn from(err: RoutineError) -> Self {
        AppError(err)
    }
}

impl From<routine_core::errors::SlotViolation> for AppError {
    fn from(violation: routine_core::errors::SlotViolation) -> Self {
        AppError(RoutineError::Validation(violation))
    }
}
