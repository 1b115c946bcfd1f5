//! Route configuration.

use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::api::handlers::{account_routes, health_routes};
use crate::api::openapi::ApiDoc;
use crate::api::state::AppState;
use common::AppError;

/// Create the main router with all routes.
///
/// Requests running past `request_timeout` are answered with 408.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(account_routes())
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(render_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// `TimeoutLayer` answers with an empty body; give it the usual error shape.
async fn render_timeout(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Request exceeded deadline");
        return AppError::Timeout.into_response();
    }
    response
}
