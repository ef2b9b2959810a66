//! Driving ports for account registration and login.
//!
//! Inbound adapters call these to create accounts and authenticate
//! credentials without importing persistence or hashing infrastructure.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching account.
    ///
    /// Unknown emails and wrong passwords fail with the same
    /// `invalid_credentials` error.
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, Error>;
}

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Register a new account with the `user` role.
    ///
    /// Fails with `duplicate_email` when the email is already taken.
    async fn register(&self, credentials: &Credentials) -> Result<User, Error>;
}
