//! HS256 JWT adapter for the `SessionTokens` port.
//!
//! Expiry is checked against the injected clock rather than by
//! `jsonwebtoken`, which reads the system time.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{SessionTokenError, SessionTokens};
use crate::domain::{Caller, Role, SessionToken, UserId};

use super::config::TokenSettings;

/// Signed claim set carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: Role,
    iat: i64,
    exp: i64,
}

/// Session tokens signed with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtSessionTokens {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl JwtSessionTokens {
    /// Build the adapter from validated settings.
    pub fn new(settings: &TokenSettings, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: Arc::new(EncodingKey::from_secret(settings.secret())),
            decoding_key: Arc::new(DecodingKey::from_secret(settings.secret())),
            validation: Arc::new(validation),
            ttl: settings.ttl(),
            clock,
        }
    }
}

impl SessionTokens for JwtSessionTokens {
    fn issue(&self, user_id: &UserId, role: Role) -> Result<SessionToken, SessionTokenError> {
        let issued_at = self.clock.utc();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(SessionToken::new)
            .map_err(|err| SessionTokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Caller, SessionTokenError> {
        if token.trim().is_empty() {
            return Err(SessionTokenError::missing());
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|err| {
            debug!(error = %err, "token rejected");
            SessionTokenError::invalid(err.to_string())
        })?;
        let claims = data.claims;

        if self.clock.utc().timestamp() >= claims.exp {
            debug!(sub = %claims.sub, "token expired");
            return Err(SessionTokenError::invalid("token expired"));
        }

        let user_id = UserId::new(&claims.sub)
            .map_err(|err| SessionTokenError::invalid(format!("bad subject: {err}")))?;
        Ok(Caller::new(user_id, claims.role))
    }
}
