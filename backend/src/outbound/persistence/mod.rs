//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel rows and domain types
//! and contain no business logic. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module. Connections come
//! from a `bb8` pool through `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use tasklist_backend::outbound::persistence::{DbPool, DieselTaskRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tasklist")).await?;
//! let tasks = DieselTaskRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_task_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
