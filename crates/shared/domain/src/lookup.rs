//! Lookup key selection.

use crate::error::{DomainError, DomainResult};

/// The single key a lookup is performed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Username(String),
    Email(String),
    Id(i64),
}

impl LookupKey {
    /// Pick one key out of optionally supplied parameters.
    ///
    /// Priority is username, then email, then id; the first non-empty value
    /// wins and the rest are ignored. An id that is not an integer is rejected
    /// here, while its sign is checked by the lookup itself.
    pub fn from_params(
        username: Option<&str>,
        email: Option<&str>,
        id: Option<&str>,
    ) -> DomainResult<Self> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.filter(|v| !v.is_empty())
        }

        if let Some(username) = present(username) {
            return Ok(LookupKey::Username(username.to_string()));
        }
        if let Some(email) = present(email) {
            return Ok(LookupKey::Email(email.to_string()));
        }
        if let Some(id) = present(id) {
            return id
                .trim()
                .parse::<i64>()
                .map(LookupKey::Id)
                .map_err(|_| DomainError::validation("id", "invalid user ID"));
        }

        Err(DomainError::MissingParameter)
    }
}
