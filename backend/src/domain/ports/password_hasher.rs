//! Port for one-way salted password hashing.
//!
//! Adapters must compare through the hashing primitive's own verify routine
//! so the comparison cost does not depend on where the inputs differ.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Producing a hash failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed or checked.
        Verify { message: String } => "password verification failed: {message}",
    }
}

/// Salted, cost-factor password hashing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Check `password` against `hash`; `Ok(false)` means a mismatch.
    async fn verify(&self, password: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHasherError>;
}
