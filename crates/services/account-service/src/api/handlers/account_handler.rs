//! Account handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::api::extractors::JsonBody;
use crate::api::state::AppState;
use common::AppResult;
use domain::{AccountResponse, LookupKey, RegisterAccount};

/// Create account routes.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/user", get(get_user))
        .route("/credentials/verify", post(verify_credentials))
}

/// Register request body.
///
/// Absent fields deserialize as empty strings so they are reported by the
/// service's own validation messages.
#[derive(Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "secret123")]
    pub password: String,
}

impl From<RegisterRequest> for RegisterAccount {
    fn from(req: RegisterRequest) -> Self {
        RegisterAccount::new(req.username, req.email, req.password)
    }
}

/// Lookup query. The first non-empty of username, email, id is used.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupQuery {
    pub username: Option<String>,
    pub email: Option<String>,
    /// Positive integer id
    pub id: Option<String>,
}

/// Credentials check request body.
#[derive(Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CredentialsRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "secret123")]
    pub password: String,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = state.accounts.register(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Look up an account by username, email or id.
#[utoipa::path(
    get,
    path = "/user",
    tag = "Accounts",
    params(LookupQuery),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 400, description = "Missing parameter or malformed id"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> AppResult<Json<AccountResponse>> {
    let key = LookupKey::from_params(
        query.username.as_deref(),
        query.email.as_deref(),
        query.id.as_deref(),
    )?;

    let account = state.accounts.lookup(key).await?;
    Ok(Json(AccountResponse::from(account)))
}

/// Check a username/password pair. Issues no token or session.
#[utoipa::path(
    post,
    path = "/credentials/verify",
    tag = "Accounts",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Credentials valid", body = AccountResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn verify_credentials(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> AppResult<Json<AccountResponse>> {
    let account = state
        .accounts
        .validate_credentials(&payload.username, &payload.password)
        .await?;
    Ok(Json(AccountResponse::from(account)))
}
