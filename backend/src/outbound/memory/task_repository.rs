//! Id-keyed in-memory `TaskRepository` with monotonic integer ids.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{TaskFilter, TaskPersistenceError, TaskRepository};
use crate::domain::{NewTask, Task, TaskId};

use super::POISONED;

#[derive(Debug, Default)]
struct TaskStore {
    next_id: i64,
    tasks: BTreeMap<TaskId, Task>,
}

/// In-memory implementation of the `TaskRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    store: Mutex<TaskStore>,
}

impl InMemoryTaskRepository {
    /// Create an empty store; the first task gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, TaskStore>, TaskPersistenceError> {
        self.store
            .lock()
            .map_err(|_| TaskPersistenceError::query(POISONED))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskPersistenceError> {
        let store = self.lock()?;
        let mut tasks: Vec<Task> = store
            .tasks
            .values()
            .filter(|task| match filter {
                TaskFilter::All => true,
                TaskFilter::OwnedBy(owner) => task.owner_id() == owner,
            })
            .cloned()
            .collect();
        tasks.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(tasks)
    }

    async fn insert(&self, task: &NewTask) -> Result<Task, TaskPersistenceError> {
        let mut store = self.lock()?;
        store.next_id += 1;
        let id = TaskId::new(store.next_id);
        let stored = Task::new(
            id,
            task.text.clone(),
            false,
            task.owner_id.clone(),
            task.created_at,
        );
        store.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskPersistenceError> {
        Ok(self.lock()?.tasks.get(&id).cloned())
    }

    async fn mark_done(&self, id: TaskId) -> Result<Option<Task>, TaskPersistenceError> {
        let mut store = self.lock()?;
        let Some(task) = store.tasks.remove(&id) else {
            return Ok(None);
        };
        let done = task.mark_done();
        store.tasks.insert(id, done.clone());
        Ok(Some(done))
    }

    async fn delete(&self, id: TaskId) -> Result<bool, TaskPersistenceError> {
        Ok(self.lock()?.tasks.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{TaskText, UserId};

    #[fixture]
    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn new_task(text: &str, owner: &UserId, created_at: DateTime<Utc>) -> NewTask {
        NewTask {
            text: TaskText::new(text).expect("text"),
            owner_id: owner.clone(),
            created_at,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_monotonic_and_never_reused(epoch: DateTime<Utc>) {
        let repo = InMemoryTaskRepository::new();
        let owner = UserId::random();
        let first = repo.insert(&new_task("a", &owner, epoch)).await.expect("a");
        assert!(repo.delete(first.id()).await.expect("delete"));
        let second = repo.insert(&new_task("b", &owner, epoch)).await.expect("b");

        assert_eq!(first.id(), TaskId::new(1));
        assert_eq!(second.id(), TaskId::new(2));
    }

    #[rstest]
    #[tokio::test]
    async fn list_is_newest_first_and_filtered(epoch: DateTime<Utc>) {
        let repo = InMemoryTaskRepository::new();
        let alice = UserId::random();
        let bob = UserId::random();
        repo.insert(&new_task("old", &alice, epoch)).await.expect("old");
        repo.insert(&new_task("bob's", &bob, epoch + Duration::minutes(1)))
            .await
            .expect("bob");
        repo.insert(&new_task("new", &alice, epoch + Duration::minutes(2)))
            .await
            .expect("new");
        repo.insert(&new_task("tie", &alice, epoch + Duration::minutes(2)))
            .await
            .expect("tie");

        let own = repo
            .list(&TaskFilter::OwnedBy(alice))
            .await
            .expect("own list");
        let texts: Vec<&str> = own.iter().map(|task| task.text().as_ref()).collect();
        assert_eq!(texts, vec!["tie", "new", "old"]);

        let all = repo.list(&TaskFilter::All).await.expect("all");
        assert_eq!(all.len(), 4);
    }

    #[rstest]
    #[tokio::test]
    async fn mark_done_is_idempotent(epoch: DateTime<Utc>) {
        let repo = InMemoryTaskRepository::new();
        let task = repo
            .insert(&new_task("a", &UserId::random(), epoch))
            .await
            .expect("insert");

        let once = repo.mark_done(task.id()).await.expect("first").expect("present");
        let twice = repo.mark_done(task.id()).await.expect("second").expect("present");
        assert!(once.done());
        assert_eq!(once, twice);
        assert!(repo.mark_done(TaskId::new(99)).await.expect("missing").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_deletes_have_one_winner(epoch: DateTime<Utc>) {
        let repo = Arc::new(InMemoryTaskRepository::new());
        let task = repo
            .insert(&new_task("a", &UserId::random(), epoch))
            .await
            .expect("insert");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                let id = task.id();
                tokio::spawn(async move { repo.delete(id).await })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.expect("join").expect("delete") {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
