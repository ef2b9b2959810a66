//! Ownership-or-admin access policy for tasks.
//!
//! Admins may act on any task; everyone else only on tasks they own.
//! Task services call
//! [`authorize`] after confirming the task exists, so a missing task is
//! reported as `not_found` before ownership is considered.

use super::{Caller, Error, Task};

/// Whether `caller` may read, complete, or delete `task`.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use tasklist_backend::domain::{can_act, Caller, Role, Task, TaskId, TaskText, UserId};
///
/// let owner = UserId::random();
/// let task = Task::new(TaskId::new(1), TaskText::new("x").unwrap(), false, owner.clone(), Utc::now());
/// assert!(can_act(&Caller::new(owner, Role::User), &task));
/// assert!(can_act(&Caller::new(UserId::random(), Role::Admin), &task));
/// assert!(!can_act(&Caller::new(UserId::random(), Role::User), &task));
/// ```
pub fn can_act(caller: &Caller, task: &Task) -> bool {
    caller.is_admin() || task.owner_id() == caller.user_id()
}

/// [`can_act`] as a `Result`, yielding a uniform `forbidden` error.
pub fn authorize(caller: &Caller, task: &Task) -> Result<(), Error> {
    if can_act(caller, task) {
        Ok(())
    } else {
        Err(Error::forbidden("not authorised to modify this task"))
    }
}
