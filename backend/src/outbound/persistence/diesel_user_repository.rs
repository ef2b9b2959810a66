//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the `users_email_key` constraint, so the
//! duplicate check and the insert happen in one statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, NewUser, PasswordHash, Role, User, UserId};

use super::diesel_basic_error_mapping::{
    USERS_EMAIL_KEY, is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: &diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let email = Email::new(&row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email invalid: {err}")))?;
    let password_hash = PasswordHash::new(row.password_hash)
        .map_err(|err| UserPersistenceError::query(format!("stored hash invalid: {err}")))?;
    let role = row.role.parse::<Role>().unwrap_or_else(|err| {
        warn!(user_id = %row.id, %err, "unrecognised role value, defaulting to user");
        Role::User
    });
    Ok(User::new(
        UserId::from_uuid(row.id),
        email,
        password_hash,
        role,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = UserId::random();
        let row = NewUserRow {
            id: *id.as_uuid(),
            email: user.email.as_ref(),
            password_hash: user.password_hash.as_str(),
            role: user.role.as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err, USERS_EMAIL_KEY) {
                    UserPersistenceError::duplicate_email(user.email.as_ref())
                } else {
                    map_diesel_error(&err)
                }
            })?;

        Ok(User::new(
            id,
            user.email.clone(),
            user.password_hash.clone(),
            user.role,
        ))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?;

        row.map(row_to_user).transpose()
    }
}
