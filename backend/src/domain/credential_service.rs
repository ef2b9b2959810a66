//! Credential store: account registration and password verification.
//!
//! The store distinguishes an unknown email from a wrong password
//! ([`CredentialError`]). The login port collapses both into one
//! `invalid_credentials` error so callers cannot probe which emails exist.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, RegistrationService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Credentials, Email, Error, NewUser, Role, User};

/// Reasons a credential check can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CredentialError {
    /// No account is registered for the email.
    #[error("no account registered for {email}")]
    NotFound { email: String },
    /// The account exists but the password does not match.
    #[error("password does not match")]
    InvalidCredentials,
    /// Infrastructure failure while checking.
    #[error(transparent)]
    Failed(#[from] Error),
}

/// Credential store service implementing registration and login.
#[derive(Clone)]
pub struct CredentialService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> CredentialService<U, H> {
    /// Create a new service over the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> CredentialService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => {
                Error::duplicate_email("email already registered")
            }
        }
    }

    fn map_hasher_error(error: PasswordHasherError) -> Error {
        Error::internal(error.to_string())
    }

    /// Look up the account for `credentials` and check its password.
    pub async fn verify(&self, credentials: &Credentials) -> Result<User, CredentialError> {
        let not_found = || CredentialError::NotFound {
            email: credentials.email().to_owned(),
        };
        let Ok(email) = Email::new(credentials.email()) else {
            return Err(not_found());
        };
        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(not_found)?;

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(Self::map_hasher_error)?;
        if matches {
            Ok(user)
        } else {
            Err(CredentialError::InvalidCredentials)
        }
    }
}

#[async_trait]
impl<U, H> RegistrationService for CredentialService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, credentials: &Credentials) -> Result<User, Error> {
        let email = Email::new(credentials.email())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let password_hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(Self::map_hasher_error)?;
        let new_user = NewUser {
            email,
            password_hash,
            role: Role::User,
        };
        self.users
            .insert(&new_user)
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[async_trait]
impl<U, H> LoginService for CredentialService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, Error> {
        match self.verify(credentials).await {
            Ok(user) => Ok(user),
            Err(CredentialError::Failed(err)) => Err(err),
            Err(rejection) => {
                debug!(reason = %rejection, "login rejected");
                Err(Error::invalid_credentials("invalid email or password"))
            }
        }
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
