use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use thiserror::Error;

use crate::entities::{prelude::*, users};

/// User data returned from the repository. The password column never
/// leaves this module.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl From<users::Model> for UserRow {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            role: model.role,
        }
    }
}

/// Typed classification of user-insert failures, so callers never have
/// to match on error message prose.
#[derive(Debug, Error)]
pub enum InsertUserError {
    #[error("username already taken")]
    UsernameTaken,

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All users, newest first, without passwords.
    pub async fn list(&self) -> Result<Vec<UserRow>> {
        let rows = Users::find()
            .order_by_desc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(rows.into_iter().map(UserRow::from).collect())
    }

    pub async fn create(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<UserRow, InsertUserError> {
        let active_model = users::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password.to_string()),
            role: Set(role.to_string()),
            ..Default::default()
        };

        let result = Users::insert(active_model)
            .exec(&self.conn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => InsertUserError::UsernameTaken,
                _ => InsertUserError::Database(e),
            })?;

        Ok(UserRow {
            id: result.last_insert_id,
            username: username.to_string(),
            role: role.to_string(),
        })
    }

    /// Exact-equality credential lookup. Passwords are compared verbatim;
    /// see the entity doc for why hashing is deliberately absent.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRow>> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::Password.eq(password))
            .one(&self.conn)
            .await
            .context("Failed to query user by credentials")?;

        Ok(user.map(UserRow::from))
    }

    /// Overwrites the password for the given username unconditionally.
    pub async fn update_password(&self, username: &str, new_password: &str) -> Result<()> {
        let active_model = users::ActiveModel {
            password: Set(new_password.to_string()),
            ..Default::default()
        };

        Users::update_many()
            .set(active_model)
            .filter(users::Column::Username.eq(username))
            .exec(&self.conn)
            .await
            .context("Failed to update password")?;

        Ok(())
    }
}
