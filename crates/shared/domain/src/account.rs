//! Account domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH};
use crate::error::{DomainError, DomainResult};

/// Trim surrounding whitespace and lower-case an identifying string.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Account domain entity
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Keep the hash out of logs
impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Registration input as received from the caller.
#[derive(Clone, Deserialize)]
pub struct RegisterAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl RegisterAccount {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the input, reporting the first violation in this order:
    /// username presence, username length, email presence, password
    /// presence, password length.
    ///
    /// Username and email are judged in normalized form, which is also what
    /// gets stored; lengths count characters.
    pub fn validate(&self) -> DomainResult<()> {
        let username = normalize(&self.username);
        if username.is_empty() {
            return Err(DomainError::validation("username", "username is required"));
        }

        let username_len = username.chars().count();
        if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&username_len) {
            return Err(DomainError::validation(
                "username",
                format!(
                    "username length must be between {} and {} characters",
                    MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
                ),
            ));
        }

        if self.email.trim().is_empty() {
            return Err(DomainError::validation("email", "email is required"));
        }

        if self.password.is_empty() {
            return Err(DomainError::validation("password", "password is required"));
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::validation(
                "password",
                format!(
                    "password length must be at least {} characters",
                    MIN_PASSWORD_LENGTH
                ),
            ));
        }

        Ok(())
    }

    /// Validate, then return the input with username and email normalized.
    /// The password is left untouched.
    pub fn into_normalized(self) -> DomainResult<Self> {
        self.validate()?;
        Ok(Self {
            username: normalize(&self.username),
            email: normalize(&self.email),
            password: self.password,
        })
    }
}

/// Account draft handed to the store; id and timestamps are assigned there.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Account view (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountResponse {
    /// Store-assigned identifier
    pub id: i64,
    /// Normalized username
    pub username: String,
    /// Normalized email address
    pub email: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
