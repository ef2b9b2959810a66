//! Email-keyed in-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, NewUser, User, UserId};

use super::POISONED;

/// In-memory implementation of the `UserRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Email, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing account, replacing any with the same email.
    ///
    /// Used to provision admins, which registration never creates.
    pub fn seed(&self, user: User) -> Result<(), UserPersistenceError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        users.insert(user.email().clone(), user);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        if users.contains_key(&user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        let stored = User::new(
            UserId::random(),
            user.email.clone(),
            user.password_hash.clone(),
            user.role,
        );
        users.insert(user.email.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        Ok(users.get(email).cloned())
    }
}
