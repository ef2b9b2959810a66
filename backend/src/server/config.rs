//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use tasklist_backend::outbound::persistence::DbPool;
use tasklist_backend::outbound::token::TokenSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_settings: TokenSettings,
    pub(crate) bcrypt_cost: u32,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration that keeps records in memory.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_settings: TokenSettings, bcrypt_cost: u32) -> Self {
        Self {
            bind_addr,
            token_settings,
            bcrypt_cost,
            db_pool: None,
        }
    }

    /// Attach a database connection pool so the Diesel repositories replace
    /// the in-memory record store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
