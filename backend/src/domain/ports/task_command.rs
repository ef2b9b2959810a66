//! Driving port for task mutations.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Task, TaskId, TaskText};

/// Domain use-case port for creating, completing and deleting tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskCommand: Send + Sync {
    /// Create a task owned by `caller`.
    async fn create(&self, caller: &Caller, text: TaskText) -> Result<Task, Error>;

    /// Mark a task as done. Fails with `not_found` before `forbidden`.
    async fn mark_done(&self, caller: &Caller, id: TaskId) -> Result<Task, Error>;

    /// Delete a task. Fails with `not_found` before `forbidden`.
    async fn delete(&self, caller: &Caller, id: TaskId) -> Result<(), Error>;
}
