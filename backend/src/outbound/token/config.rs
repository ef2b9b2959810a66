//! Signing secret configuration for session tokens.
//!
//! The secret comes from `JWT_SECRET` or, when that is unset, from the file
//! named by `JWT_SECRET_FILE`. Either way it is read once at startup and a
//! missing or empty secret is fatal.

use std::path::PathBuf;

use chrono::Duration;
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

const SECRET_ENV: &str = "JWT_SECRET";
const SECRET_FILE_ENV: &str = "JWT_SECRET_FILE";
const SECRET_RECOMMENDED_LEN: usize = 32;

/// Lifetime of an issued token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Validated token signing settings.
pub struct TokenSettings {
    secret: Zeroizing<Vec<u8>>,
    ttl: Duration,
}

impl TokenSettings {
    /// Settings with `secret` and the standard 24 hour lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`TokenConfigError::EmptySecret`] for an empty secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, TokenConfigError> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(TokenConfigError::EmptySecret);
        }
        if secret.len() < SECRET_RECOMMENDED_LEN {
            warn!(
                length = secret.len(),
                recommended = SECRET_RECOMMENDED_LEN,
                "JWT secret is shorter than recommended"
            );
        }
        Ok(Self {
            secret,
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        })
    }

    /// Override the token lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub(super) fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Errors raised while loading the token signing secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// Neither `JWT_SECRET` nor `JWT_SECRET_FILE` is set.
    #[error("missing signing secret: set JWT_SECRET or JWT_SECRET_FILE")]
    MissingSecret,
    /// The configured secret is empty.
    #[error("signing secret must not be empty")]
    EmptySecret,
    /// Reading the secret file failed.
    #[error("failed to read signing secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load token settings from the environment.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use tasklist_backend::outbound::token::token_settings_from_env;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_SECRET" => Some("an-example-secret-of-thirty-two-bytes".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env).expect("secret configured");
/// assert_eq!(settings.ttl().num_hours(), 24);
/// ```
pub fn token_settings_from_env<E: Env>(env: &E) -> Result<TokenSettings, TokenConfigError> {
    if let Some(secret) = env.string(SECRET_ENV) {
        return TokenSettings::new(secret.into_bytes());
    }

    let path = env
        .string(SECRET_FILE_ENV)
        .map(PathBuf::from)
        .ok_or(TokenConfigError::MissingSecret)?;
    let bytes = Zeroizing::new(
        std::fs::read(&path).map_err(|source| TokenConfigError::SecretRead {
            path: path.clone(),
            source,
        })?,
    );
    let trimmed = bytes.trim_ascii();
    TokenSettings::new(trimmed.to_vec())
}
