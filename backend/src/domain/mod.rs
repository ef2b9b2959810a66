//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services that implement the driving ports.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) - API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) - stable error identifier.
//! - User, Email, Role - registered accounts.
//! - Task, TaskId, TaskText - task records.
//! - Caller, Credentials, SessionToken - authentication values.
//! - `can_act` / `authorize` - the ownership-or-admin access policy.
//! - CredentialService, TaskService - driving port implementations.

pub mod access;
pub mod auth;
pub mod credential_service;
pub mod error;
pub mod ports;
pub mod task;
pub mod task_service;
pub mod trace_id;
pub mod user;

pub use self::access::{authorize, can_act};
pub use self::auth::{
    Caller, Credentials, CredentialsValidationError, MAX_PASSWORD_BYTES, SessionToken,
};
pub use self::credential_service::{CredentialError, CredentialService};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::task::{NewTask, Task, TaskId, TaskText, TaskValidationError};
pub use self::task_service::TaskService;
pub use self::trace_id::TraceId;
pub use self::user::{
    Email, MAX_EMAIL_LENGTH, NewUser, PasswordHash, Role, User, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use tasklist_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
