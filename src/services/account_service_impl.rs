//! `SeaORM` implementation of the `AccountService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{InsertUserError, Store, UserRow};
use crate::services::account_service::{AccountError, AccountInfo, AccountService};

/// Role assigned to every self-registered account.
const DEFAULT_ROLE: &str = "user";

pub struct SeaOrmAccountService {
    store: Store,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn list(&self) -> Result<Vec<UserRow>, AccountError> {
        let rows = self.store.list_users().await?;
        Ok(rows)
    }

    async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccountInfo, AccountError> {
        if username.is_empty() || password.is_empty() {
            return Err(AccountError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let row = self
            .store
            .create_user(username, password, DEFAULT_ROLE)
            .await
            .map_err(|e| match e {
                InsertUserError::UsernameTaken => AccountError::UsernameTaken,
                InsertUserError::Database(e) => AccountError::Database(e.to_string()),
            })?;

        info!("Registered account: {username}");
        Ok(AccountInfo::from(row))
    }

    async fn login(&self, username: &str, password: &str) -> Result<AccountInfo, AccountError> {
        let user = self
            .store
            .find_user_by_credentials(username, password)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        Ok(AccountInfo::from(user))
    }

    async fn change_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        // Phase 1: re-authenticate. Read-only, so failing here leaves
        // the stored password untouched.
        let user = self
            .store
            .find_user_by_credentials(username, old_password)
            .await?;

        if user.is_none() {
            return Err(AccountError::InvalidCredentials);
        }

        // Phase 2: overwrite unconditionally. Issued only after phase 1
        // has resolved; the two statements are not a transaction.
        self.store
            .update_user_password(username, new_password)
            .await?;

        info!("Password changed for account: {username}");
        Ok(())
    }
}
