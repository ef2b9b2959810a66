//! Port for issuing and verifying stateless session tokens.
//!
//! Tokens are self-contained signed claim sets `{userId, role, issuedAt,
//! expiresAt}`. Nothing is persisted, so a token stays valid until it
//! expires; revocation would need a per-user token generation stored on the
//! account, which this port does not model.

use crate::domain::{Caller, Role, SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by session token adapters.
    pub enum SessionTokenError {
        /// No token was supplied.
        Missing => "session token missing",
        /// Signature, payload, or expiry check failed.
        Invalid { message: String } => "session token invalid: {message}",
        /// Encoding a new token failed.
        Signing { message: String } => "session token signing failed: {message}",
    }
}

/// Token service used by login (issue) and the authorisation guard (verify).
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokens: Send + Sync {
    /// Mint a token for `user_id` with `role`, expiring after the configured
    /// lifetime.
    fn issue(&self, user_id: &UserId, role: Role) -> Result<SessionToken, SessionTokenError>;

    /// Verify `token` and return the identity it carries.
    ///
    /// Tampered, malformed, and expired tokens all yield
    /// [`SessionTokenError::Invalid`].
    fn verify(&self, token: &str) -> Result<Caller, SessionTokenError>;
}
