//! Error types for the LMS attendance server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::worktime::validate::ValidationError;

/// Stable numeric error codes surfaced in API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    BadValue = 4,
    Conflict = 5,
    NotWorkday = 6,
    RangeError = 7,
    RejectedSubmission = 8,
    NoSuchData = 9,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Unauthenticated(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("State conflict: {0}")]
    StateConflict(String),

    #[error("Not a training day: {0}")]
    NotAWorkday(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// Batch submission rejected as one atomic report; nothing was
    /// persisted.
    #[error("submission rejected with {} validation error(s)", .0.len())]
    BatchRejected(Vec<ValidationError>),
}

/// One rejected rule in a batch report
#[derive(Serialize, utoipa::ToSchema)]
pub struct ValidationIssue {
    /// Rule tag: letter, optional sub-field marker, 0-based row (e.g. "bh0")
    pub code: String,
    pub message: String,
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationIssue>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone(), None)
            }
            AppError::PermissionDenied(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone(), None)
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone(), None)
            }
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone(), None)
            }
            AppError::InvalidRange(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::RangeError, msg.clone(), None)
            }
            AppError::StateConflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Conflict, msg.clone(), None)
            }
            AppError::NotAWorkday(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::NotWorkday, msg.clone(), None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::BatchRejected(errors) => {
                let issues = errors
                    .iter()
                    .map(|e| ValidationIssue {
                        code: e.tag(),
                        message: e.message.clone(),
                    })
                    .collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorCode::RejectedSubmission,
                    "Attendance submission was rejected".to_string(),
                    Some(issues),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
