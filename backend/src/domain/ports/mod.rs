//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod session_tokens;
mod task_command;
mod task_query;
mod task_repository;
mod user_repository;

#[cfg(test)]
pub use login_service::{MockLoginService, MockRegistrationService};
pub use login_service::{LoginService, RegistrationService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use session_tokens::MockSessionTokens;
pub use session_tokens::{SessionTokenError, SessionTokens};
#[cfg(test)]
pub use task_command::MockTaskCommand;
pub use task_command::TaskCommand;
#[cfg(test)]
pub use task_query::MockTaskQuery;
pub use task_query::TaskQuery;
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskFilter, TaskPersistenceError, TaskRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
