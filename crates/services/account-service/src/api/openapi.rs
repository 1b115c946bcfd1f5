//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::api::handlers::account_handler::{CredentialsRequest, RegisterRequest};
use crate::api::handlers::health_handler::HealthResponse;
use domain::AccountResponse;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::account_handler::register,
        crate::api::handlers::account_handler::get_user,
        crate::api::handlers::account_handler::verify_credentials,
        crate::api::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            RegisterRequest,
            CredentialsRequest,
            AccountResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "Accounts", description = "Account registration and lookup"),
        (name = "Health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;
