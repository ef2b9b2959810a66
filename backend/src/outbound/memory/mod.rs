//! In-process record store used when no database is configured.
//!
//! Each repository guards its map with a single mutex, so every operation is
//! atomic with respect to the others. Data is lost on restart.

mod task_repository;
mod user_repository;

pub use task_repository::InMemoryTaskRepository;
pub use user_repository::InMemoryUserRepository;

const POISONED: &str = "in-memory store lock poisoned";
