//! Task services implementing the task driving ports.
//!
//! Mutations load the task first and only then consult the access policy, so
//! a missing task is always `not_found` and never leaks as `forbidden`. A
//! record that vanishes between the lookup and the write (a racing delete) is
//! also reported as `not_found`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    TaskCommand, TaskFilter, TaskPersistenceError, TaskQuery, TaskRepository,
};
use crate::domain::{Caller, Error, NewTask, Task, TaskId, TaskText, authorize};

/// Task service backed by a [`TaskRepository`].
#[derive(Clone)]
pub struct TaskService<R> {
    tasks: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TaskService<R> {
    /// Create a new service; `clock` stamps `createdAt` on new tasks.
    pub fn new(tasks: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { tasks, clock }
    }
}

impl<R> TaskService<R>
where
    R: TaskRepository,
{
    fn map_persistence_error(error: TaskPersistenceError) -> Error {
        match error {
            TaskPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("task repository unavailable: {message}"))
            }
            TaskPersistenceError::Query { message } => {
                Error::internal(format!("task repository error: {message}"))
            }
        }
    }

    fn not_found(id: TaskId) -> Error {
        Error::not_found(format!("task {id} not found"))
    }

    async fn load_authorized(&self, caller: &Caller, id: TaskId) -> Result<Task, Error> {
        let task = self
            .tasks
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Self::not_found(id))?;
        authorize(caller, &task)?;
        Ok(task)
    }
}

#[async_trait]
impl<R> TaskQuery for TaskService<R>
where
    R: TaskRepository,
{
    async fn list(&self, caller: &Caller) -> Result<Vec<Task>, Error> {
        let filter = if caller.is_admin() {
            TaskFilter::All
        } else {
            TaskFilter::OwnedBy(caller.user_id().clone())
        };
        self.tasks
            .list(&filter)
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[async_trait]
impl<R> TaskCommand for TaskService<R>
where
    R: TaskRepository,
{
    async fn create(&self, caller: &Caller, text: TaskText) -> Result<Task, Error> {
        let new_task = NewTask {
            text,
            owner_id: caller.user_id().clone(),
            created_at: self.clock.utc(),
        };
        let task = self
            .tasks
            .insert(&new_task)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(task_id = %task.id(), owner_id = %task.owner_id(), "task created");
        Ok(task)
    }

    async fn mark_done(&self, caller: &Caller, id: TaskId) -> Result<Task, Error> {
        let task = self.load_authorized(caller, id).await?;
        if task.done() {
            return Ok(task);
        }
        self.tasks
            .mark_done(id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn delete(&self, caller: &Caller, id: TaskId) -> Result<(), Error> {
        self.load_authorized(caller, id).await?;
        let removed = self
            .tasks
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)?;
        if !removed {
            return Err(Self::not_found(id));
        }
        info!(task_id = %id, caller = %caller.user_id(), "task deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
