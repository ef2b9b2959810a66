//! Shared validation helpers for inbound HTTP adapters.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyField,
    TooLong,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::EmptyField => "empty_field",
            ErrorCode::TooLong => "too_long",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
    )
}

pub(crate) fn empty_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("{name} must not be empty"),
        ErrorCode::EmptyField,
    )
}

pub(crate) fn too_long_field_error(field: FieldName, limit: impl std::fmt::Display) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("{name} must be at most {limit}"),
        ErrorCode::TooLong,
    )
}

/// Unwrap an optional body field, reporting which one was absent.
pub(crate) fn require_field(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Reject unparseable JSON bodies with the standard error envelope.
///
/// Installed through [`json_config`] so malformed payloads and wrong content
/// types surface as `invalid_request` rather than Actix's plain-text 400.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting malformed JSON body");
    Error::invalid_request("request body must be a JSON object")
        .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }))
        .into()
}

/// JSON extractor configuration shared by every JSON endpoint.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}
