//! bcrypt-backed `PasswordHasher`.
//!
//! bcrypt is CPU bound, so both operations run on the blocking pool
//! with the caller's trace id re-entered for log correlation.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{PasswordHash, TraceId};

/// Cost factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Raised when a configured cost is outside bcrypt's accepted range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("bcrypt cost must be between {min} and {max}, got {cost}")]
pub struct InvalidCostError {
    cost: u32,
    min: u32,
    max: u32,
}

/// Password hasher using bcrypt with a fixed cost factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    const MIN_COST: u32 = 4;
    const MAX_COST: u32 = 31;

    /// Build a hasher with `cost` rounds (as a power of two).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCostError`] when `cost` is outside `4..=31`.
    pub fn new(cost: u32) -> Result<Self, InvalidCostError> {
        if (Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            Ok(Self { cost })
        } else {
            Err(InvalidCostError {
                cost,
                min: Self::MIN_COST,
                max: Self::MAX_COST,
            })
        }
    }

    /// Configured cost factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

async fn run_blocking<F, T>(f: F) -> Result<T, String>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || match trace_id {
        Some(id) => TraceId::sync_scope(id, f),
        None => f(),
    })
    .await
    .map_err(|err| format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let cost = self.cost;
        let password = zeroize::Zeroizing::new(password.to_owned());
        let encoded = run_blocking(move || bcrypt::hash(password.as_str(), cost))
            .await
            .map_err(PasswordHasherError::hash)?
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        PasswordHash::new(encoded).map_err(|err| PasswordHasherError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        let matches = run_blocking(move || bcrypt::verify(password.as_str(), &encoded))
            .await
            .map_err(PasswordHasherError::verify)?
            .map_err(|err| PasswordHasherError::verify(err.to_string()))?;
        debug!(matches, "password verified");
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    //! Uses the minimum cost so the suite stays fast.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(4).expect("minimum cost is valid")
    }

    #[rstest]
    #[case(3)]
    #[case(32)]
    fn cost_outside_range_is_rejected(#[case] cost: u32) {
        let err = BcryptPasswordHasher::new(cost).expect_err("cost rejected");
        assert!(err.to_string().contains(&cost.to_string()));
    }

    #[rstest]
    fn default_cost_is_ten() {
        assert_eq!(BcryptPasswordHasher::default().cost(), DEFAULT_BCRYPT_COST);
    }

    #[rstest]
    #[tokio::test]
    async fn hash_is_salted_and_verifies(hasher: BcryptPasswordHasher) {
        let first = hasher.hash("pw123").await.expect("hash");
        let second = hasher.hash("pw123").await.expect("hash");

        assert_ne!(first.as_str(), "pw123");
        assert_ne!(first, second);
        assert!(hasher.verify("pw123", &first).await.expect("verify"));
        assert!(!hasher.verify("pw124", &first).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn password_whitespace_is_significant(hasher: BcryptPasswordHasher) {
        let hash = hasher.hash(" pw123 ").await.expect("hash");
        assert!(!hasher.verify("pw123", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_is_an_error(hasher: BcryptPasswordHasher) {
        let bogus = PasswordHash::new("not-a-bcrypt-hash").expect("non-empty");
        let err = hasher.verify("pw123", &bogus).await.expect_err("malformed");
        assert!(matches!(err, PasswordHasherError::Verify { .. }));
    }
}
