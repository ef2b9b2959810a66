//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, RegistrationService, SessionTokens, TaskCommand, TaskQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub tokens: Arc<dyn SessionTokens>,
    pub tasks: Arc<dyn TaskCommand>,
    pub tasks_query: Arc<dyn TaskQuery>,
}

impl HttpState {
    /// Bundle the account ports with the task ports.
    pub fn new(
        login: Arc<dyn LoginService>,
        registration: Arc<dyn RegistrationService>,
        tokens: Arc<dyn SessionTokens>,
        tasks: Arc<dyn TaskCommand>,
        tasks_query: Arc<dyn TaskQuery>,
    ) -> Self {
        Self {
            login,
            registration,
            tokens,
            tasks,
            tasks_query,
        }
    }
}
