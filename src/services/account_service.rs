//! Domain service for user accounts.
//!
//! Handles registration, login, password changes, and listing.

use serde::Serialize;
use thiserror::Error;

use crate::db::UserRow;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Public view of an account, returned from register and login.
/// Never carries the password.
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    pub username: String,
    pub role: String,
}

impl From<UserRow> for AccountInfo {
    fn from(row: UserRow) -> Self {
        Self {
            username: row.username,
            role: row.role,
        }
    }
}

/// Domain service trait for accounts.
#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// All accounts, newest first, without passwords.
    async fn list(&self) -> Result<Vec<UserRow>, AccountError>;

    /// Creates an account with role `"user"`. Clients cannot pick a role.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Validation`] when username or password is
    /// empty, and [`AccountError::UsernameTaken`] on a duplicate username.
    async fn register(&self, username: &str, password: &str)
    -> Result<AccountInfo, AccountError>;

    /// Verifies credentials by exact match.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] when no row matches,
    /// distinct from [`AccountError::Database`] for lookup failures.
    async fn login(&self, username: &str, password: &str) -> Result<AccountInfo, AccountError>;

    /// Two-phase password change: re-authenticate with the old password,
    /// then overwrite with the new one. Phase 1 performs no mutation, so
    /// a failure there leaves the account untouched.
    async fn change_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError>;
}
