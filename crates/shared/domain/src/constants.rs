//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum username length (after trimming)
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length (after trimming)
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Messages
// =============================================================================

/// Returned for both pre-check hits and unique-constraint violations
pub const DUPLICATE_ACCOUNT_MESSAGE: &str = "user with this username or email already exists";

/// Returned when a lookup names none of username, email or id
pub const MISSING_LOOKUP_PARAMETER_MESSAGE: &str =
    "please provide username, email, or id parameter";

// =============================================================================
// Service
// =============================================================================

/// Default service name reported by the health endpoint
pub const DEFAULT_SERVICE_NAME: &str = "account-service";

/// Health status reported while the process is up
pub const HEALTH_STATUS_HEALTHY: &str = "healthy";
