//! Builders wiring domain services to their outbound adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use tasklist_backend::domain::ports::{PasswordHasher, TaskRepository, UserRepository};
use tasklist_backend::domain::{CredentialService, TaskService};
use tasklist_backend::inbound::http::state::HttpState;
use tasklist_backend::outbound::crypto::BcryptPasswordHasher;
use tasklist_backend::outbound::memory::{InMemoryTaskRepository, InMemoryUserRepository};
use tasklist_backend::outbound::persistence::{DieselTaskRepository, DieselUserRepository};
use tasklist_backend::outbound::token::JwtSessionTokens;

use super::ServerConfig;

/// Compose handler state from a pair of repositories.
fn assemble<U, T, H>(
    users: Arc<U>,
    tasks: Arc<T>,
    hasher: Arc<H>,
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    T: TaskRepository + 'static,
    H: PasswordHasher + 'static,
{
    let credentials = Arc::new(CredentialService::new(users, hasher));
    let task_service = Arc::new(TaskService::new(tasks, clock.clone()));
    let tokens = Arc::new(JwtSessionTokens::new(&config.token_settings, clock));
    HttpState::new(
        credentials.clone(),
        credentials,
        tokens,
        task_service.clone(),
        task_service,
    )
}

/// Build the HTTP state, choosing the Diesel repositories when a pool is
/// configured and the in-memory store otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] when the configured bcrypt cost is out of range.
pub fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let hasher = Arc::new(
        BcryptPasswordHasher::new(config.bcrypt_cost).map_err(std::io::Error::other)?,
    );
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL record store");
            assemble(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselTaskRepository::new(pool.clone())),
                hasher,
                config,
                clock,
            )
        }
        None => {
            warn!("no database configured; records are kept in memory and lost on restart");
            assemble(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryTaskRepository::new()),
                hasher,
                config,
                clock,
            )
        }
    };
    Ok(web::Data::new(state))
}
