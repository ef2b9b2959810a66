//! Driving port for task reads.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Task};

/// Domain use-case port for listing tasks visible to a caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQuery: Send + Sync {
    /// Admins see every task; everyone else sees only their own. Newest first.
    async fn list(&self, caller: &Caller) -> Result<Vec<Task>, Error>;
}
