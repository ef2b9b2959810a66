//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.
//!
//! Each mutation is a single statement keyed by primary key, so concurrent
//! updates and deletes of the same task are serialised by PostgreSQL.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TaskFilter, TaskPersistenceError, TaskRepository};
use crate::domain::{NewTask, Task, TaskId, TaskText, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTaskRow, TaskRow};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed implementation of the `TaskRepository` port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskPersistenceError {
    map_basic_pool_error(error, TaskPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TaskPersistenceError {
    map_basic_diesel_error(
        &error,
        TaskPersistenceError::query,
        TaskPersistenceError::connection,
    )
}

fn row_to_task(row: TaskRow) -> Result<Task, TaskPersistenceError> {
    let text = TaskText::new(&row.text).map_err(|err| {
        TaskPersistenceError::query(format!("stored task {} invalid: {err}", row.id))
    })?;
    Ok(Task::new(
        TaskId::new(row.id),
        text,
        row.done,
        UserId::from_uuid(row.owner_id),
        row.created_at,
    ))
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = tasks::table
            .select(TaskRow::as_select())
            .order((tasks::created_at.desc(), tasks::id.desc()))
            .into_boxed();
        if let TaskFilter::OwnedBy(owner) = filter {
            query = query.filter(tasks::owner_id.eq(*owner.as_uuid()));
        }

        let rows: Vec<TaskRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_task).collect()
    }

    async fn insert(&self, task: &NewTask) -> Result<Task, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTaskRow {
            text: task.text.as_ref(),
            done: false,
            owner_id: *task.owner_id.as_uuid(),
            created_at: task.created_at,
        };

        let stored: TaskRow = diesel::insert_into(tasks::table)
            .values(&row)
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_task(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TaskRow> = tasks::table
            .find(id.get())
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_task).transpose()
    }

    async fn mark_done(&self, id: TaskId) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TaskRow> = diesel::update(tasks::table.find(id.get()))
            .set(tasks::done.eq(true))
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_task).transpose()
    }

    async fn delete(&self, id: TaskId) -> Result<bool, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(tasks::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
