//! Backend entry-point: loads configuration, prepares the record store and
//! serves the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use tasklist_backend::inbound::http::health::HealthState;
use tasklist_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use tasklist_backend::outbound::token::token_settings_from_env;
use tasklist_backend::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|e| {
        error!(error = %e, "failed to load server settings");
        std::io::Error::other(format!("failed to load server settings: {e}"))
    })?;

    let token_settings = token_settings_from_env(&DefaultEnv::new()).map_err(|e| {
        error!(error = %e, "signing secret unavailable");
        std::io::Error::other(e)
    })?;

    let mut config = ServerConfig::new(settings.bind_addr(), token_settings, settings.bcrypt_cost());

    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|e| std::io::Error::other(e.into_message()))?;
        config = config.with_db_pool(pool);
    }

    info!(addr = %settings.bind_addr(), "starting task list server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
