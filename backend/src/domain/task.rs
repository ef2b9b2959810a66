//! Task aggregate.
//!
//! A task belongs to exactly one user for its whole life. The only state
//! transition is `done: false -> true`; there is no way back and no partial
//! edit of the text.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Validation errors returned by task constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyText,
    InvalidId { value: String },
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be empty"),
            Self::InvalidId { value } => write!(f, "task id must be an integer, got {value}"),
        }
    }
}

impl std::error::Error for TaskValidationError {}

/// Integer task identifier assigned by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .parse::<i64>()
            .map(Self)
            .map_err(|_| TaskValidationError::InvalidId {
                value: value.to_owned(),
            })
    }
}

/// Task description.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskText(String);

impl TaskText {
    /// Validate and construct task text.
    pub fn new(text: impl AsRef<str>) -> Result<Self, TaskValidationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for TaskText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<TaskText> for String {
    fn from(value: TaskText) -> Self {
        value.0
    }
}

impl TryFrom<String> for TaskText {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// To-do item owned by a single user.
///
/// Serialises as `{id, text, done, ownerId, createdAt}`.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use tasklist_backend::domain::{Task, TaskId, TaskText, UserId};
///
/// let task = Task::new(
///     TaskId::new(1),
///     TaskText::new("buy milk").unwrap(),
///     false,
///     UserId::random(),
///     Utc::now(),
/// );
/// assert!(!task.done());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    text: TaskText,
    done: bool,
    owner_id: UserId,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Build a task from validated components.
    pub fn new(
        id: TaskId,
        text: TaskText,
        done: bool,
        owner_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text,
            done,
            owner_id,
            created_at,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &TaskText {
        &self.text
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Return the task with `done` set; already-done tasks are unchanged.
    #[must_use]
    pub fn mark_done(mut self) -> Self {
        self.done = true;
        self
    }
}

/// Task data handed to the repository on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub text: TaskText,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}
