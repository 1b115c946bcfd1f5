//! Application state for dependency injection.

use std::sync::Arc;

use crate::service::AccountService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountService>,
    /// Reported by the health endpoint
    pub service_name: String,
}

impl AppState {
    /// Create new app state.
    pub fn new(accounts: Arc<dyn AccountService>, service_name: impl Into<String>) -> Self {
        Self {
            accounts,
            service_name: service_name.into(),
        }
    }
}
