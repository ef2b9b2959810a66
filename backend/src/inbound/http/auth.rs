//! Bearer-token guard for protected handlers.
//!
//! Declaring an [`AuthenticatedCaller`] argument makes a handler protected:
//! the extractor runs before the handler body, so no task lookup happens for
//! an unauthenticated request.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::SessionTokenError;
use crate::domain::{Caller, Error};

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Identity of the caller, proven by a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(Caller);

impl AuthenticatedCaller {
    /// Borrow the verified identity.
    pub fn caller(&self) -> &Caller {
        &self.0
    }

    /// Take the verified identity.
    pub fn into_inner(self) -> Caller {
        self.0
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Returns `None` when there is no
/// bearer token to verify.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn map_token_error(error: SessionTokenError) -> Error {
    match error {
        SessionTokenError::Missing => Error::missing_token("authorization token required"),
        SessionTokenError::Invalid { message } => {
            debug!(%message, "bearer token rejected");
            Error::invalid_token("invalid or expired token")
        }
        SessionTokenError::Signing { message } => Error::internal(message),
    }
}

fn authenticate(req: &HttpRequest) -> Result<Caller, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state not configured"))?;

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| Error::missing_token("authorization token required"))?;

    state.tokens.verify(token).map_err(map_token_error)
}

impl FromRequest for AuthenticatedCaller {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(Self))
    }
}
