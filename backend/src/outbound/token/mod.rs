//! Session token adapters and their configuration.

mod config;
mod jwt_session_tokens;

pub use config::{TOKEN_TTL_HOURS, TokenConfigError, TokenSettings, token_settings_from_env};
pub use jwt_session_tokens::JwtSessionTokens;
