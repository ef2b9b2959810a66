//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and live in the inbound adapter
//! where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Registration used an email that is already taken.
    #[schema(rename = "duplicate_email")]
    DuplicateEmail,
    /// Login email or password did not match.
    #[schema(rename = "invalid_credentials")]
    InvalidCredentials,
    /// No bearer token was supplied.
    #[schema(rename = "missing_token")]
    MissingToken,
    /// The bearer token is tampered, malformed, or expired.
    #[schema(rename = "invalid_token")]
    InvalidToken,
    /// Authenticated but not permitted to act on the task.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested task does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The record store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "text must not be empty")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Task`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Task)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TaskSchema {
    /// Integer task identifier.
    #[schema(example = 1)]
    id: i64,
    /// Task text, trimmed and non-empty.
    #[schema(example = "Buy milk")]
    text: String,
    /// Completion flag.
    done: bool,
    /// Identifier of the owning user.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    owner_id: String,
    /// Creation time, RFC 3339.
    #[schema(value_type = String, format = DateTime, example = "2026-03-14T09:30:00Z")]
    created_at: String,
}
