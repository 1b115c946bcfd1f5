//! Health check handler.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::state::AppState;
use domain::HEALTH_STATUS_HEALTHY;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness probe. Does not touch the store.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS_HEALTHY.to_string(),
        service: state.service_name.clone(),
    })
}
