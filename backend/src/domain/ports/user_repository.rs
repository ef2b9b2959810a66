//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, NewUser, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email is already registered to another account.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Key-indexed store of registered accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return it with its assigned id.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the email is
    /// taken. The check and the insert are atomic.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch an account by its exact (case-sensitive) email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;
}
