//! Port abstraction for task persistence adapters and their errors.
//!
//! Every mutation addresses a single record and must be atomic: when two
//! deletes race for the same id, exactly one reports success and the other
//! sees the record as gone.

use async_trait::async_trait;

use crate::domain::{NewTask, Task, TaskId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by task repository adapters.
    pub enum TaskPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "task repository query failed: {message}",
    }
}

/// Visibility filter applied when listing tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    /// Every task regardless of owner.
    All,
    /// Only tasks owned by the given user.
    OwnedBy(UserId),
}

/// Key-indexed store of tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// List tasks matching `filter`, newest first.
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Insert a task, assigning the next integer id.
    async fn insert(&self, task: &NewTask) -> Result<Task, TaskPersistenceError>;

    /// Fetch a task by id.
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskPersistenceError>;

    /// Set `done = true`. Returns `None` when the task no longer exists.
    async fn mark_done(&self, id: TaskId) -> Result<Option<Task>, TaskPersistenceError>;

    /// Remove the task. Returns `false` when it no longer exists.
    async fn delete(&self, id: TaskId) -> Result<bool, TaskPersistenceError>;
}
