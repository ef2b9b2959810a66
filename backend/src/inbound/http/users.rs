//! Account API handlers.
//!
//! ```text
//! POST /api/register {"email":"alice@example.com","password":"pw123"}
//! POST /api/login {"email":"alice@example.com","password":"pw123"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ports::SessionTokenError;
use crate::domain::{
    Credentials, CredentialsValidationError, Error, MAX_EMAIL_LENGTH, MAX_PASSWORD_BYTES,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, empty_field_error, require_field, too_long_field_error,
};

const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");

/// Request body shared by `POST /api/register` and `POST /api/login`.
///
/// Example JSON:
/// `{"email":"alice@example.com","password":"pw123"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = Error;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        let email = require_field(value.email, EMAIL)?;
        let password = require_field(value.password, PASSWORD)?;
        Self::try_from_parts(&email, &password).map_err(map_credentials_validation_error)
    }
}

fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyEmail => empty_field_error(EMAIL),
        CredentialsValidationError::EmailTooLong => {
            too_long_field_error(EMAIL, format_args!("{MAX_EMAIL_LENGTH} characters"))
        }
        CredentialsValidationError::EmptyPassword => empty_field_error(PASSWORD),
        CredentialsValidationError::PasswordTooLong => {
            too_long_field_error(PASSWORD, format_args!("{MAX_PASSWORD_BYTES} bytes"))
        }
    }
}

/// Response body for a successful registration.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisteredResponse {
    #[schema(example = "user registered")]
    pub message: String,
}

/// Response body carrying a freshly issued bearer token.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Create an account with the `user` role.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = RegisteredResponse),
        (status = 400, description = "Invalid request or duplicate email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    let user = state.registration.register(&credentials).await?;
    info!(user_id = %user.id(), "account registered");
    Ok(HttpResponse::Created().json(RegisteredResponse {
        message: "user registered".to_owned(),
    }))
}

/// Exchange valid credentials for a bearer token.
///
/// Unknown emails and wrong passwords produce the same response.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request or credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    let user = state.login.authenticate(&credentials).await?;
    let token = state
        .tokens
        .issue(user.id(), user.role())
        .map_err(map_issue_error)?;
    Ok(web::Json(TokenResponse {
        token: token.into_inner(),
    }))
}

fn map_issue_error(err: SessionTokenError) -> Error {
    Error::internal(format!("failed to issue session token: {err}"))
}
