//! Unified error handling for the service and its HTTP boundary.
//!
//! Client-facing kinds (validation, conflict, not found, invalid credentials)
//! keep their own variants all the way up so the boundary can map them to
//! statuses by matching, never by message text. Everything else is an
//! infrastructure failure: logged, then reported without detail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, HashError, MISSING_LOOKUP_PARAMETER_MESSAGE};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Client input
    #[error("{reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    #[error("{}", MISSING_LOOKUP_PARAMETER_MESSAGE)]
    MissingParameter,

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Business rules
    #[error("{0}")]
    Conflict(String),

    #[error("user not found")]
    NotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("request timed out")]
    Timeout,

    // Infrastructure
    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::MissingParameter => "MISSING_PARAMETER",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Conflict(_) => "CONFLICT",
            AppError::NotFound => "NOT_FOUND",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Timeout => "REQUEST_TIMEOUT",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Hash(_) => "HASH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::MissingParameter | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for failures the caller cannot fix by changing its input.
    pub fn is_infrastructure(&self) -> bool {
        self.status().is_server_error()
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation { reason, .. } => reason.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),

            // Hide details for internal errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Hash(e) => {
                tracing::error!("Hashing error: {}", e);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }

    fn field(&self) -> Option<&'static str> {
        match self {
            AppError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                field: self.field(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { field, reason } => AppError::Validation { field, reason },
            DomainError::MissingParameter => AppError::MissingParameter,
            DomainError::NotFound(_) => AppError::NotFound,
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
