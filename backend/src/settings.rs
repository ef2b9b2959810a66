//! Server settings loaded via OrthoConfig.
//!
//! Values come from `TASKLIST_*` environment variables, configuration files
//! and command-line flags. The signing secret is not part of these settings;
//! see [`crate::outbound::token::token_settings_from_env`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::crypto::DEFAULT_BCRYPT_COST;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Settings controlling the HTTP listener, record store and password hashing.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKLIST")]
pub struct ServerSettings {
    /// Address to bind. Defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind. Defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Without one the server keeps records in
    /// memory and loses them on restart.
    pub database_url: Option<String>,
    /// bcrypt cost factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
}

impl ServerSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured connection string, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// bcrypt cost, falling back to the default of 10.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }
}
