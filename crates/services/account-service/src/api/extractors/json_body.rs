//! JSON body extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use common::AppError;

/// JSON extractor whose rejections use the service's error body.
///
/// Field-level rules are left to the service so they are checked in one
/// place and in a fixed order.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e.body_text(), "Rejected request body");
            AppError::bad_request("Invalid request body")
        })?;

        Ok(JsonBody(value))
    }
}
