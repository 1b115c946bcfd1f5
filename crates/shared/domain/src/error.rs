//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use crate::constants::{DUPLICATE_ACCOUNT_MESSAGE, MISSING_LOOKUP_PARAMETER_MESSAGE};

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A single input field failed validation
    #[error("{reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// A lookup was requested without any identifying key
    #[error("{}", MISSING_LOOKUP_PARAMETER_MESSAGE)]
    MissingParameter,

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Entity already exists (conflict)
    #[error("{0}")]
    Conflict(String),

    /// Unknown user or wrong password, deliberately indistinguishable
    #[error("invalid credentials")]
    InvalidCredentials,
}

impl DomainError {
    /// Create a validation error for `field`
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Conflict raised when a username or email is already taken
    pub fn duplicate_account() -> Self {
        DomainError::Conflict(DUPLICATE_ACCOUNT_MESSAGE.to_string())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
