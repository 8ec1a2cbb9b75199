use crate::{models::Account, Result, Success};

use super::Migration;

#[async_trait]
pub trait AbstractDatabase: std::marker::Sync {
    /// Run a database migration
    async fn run_migration(&self, migration: Migration) -> Success;

    /// Find account by id
    async fn find_account(&self, id: &str) -> Result<Account>;

    /// Find account by username
    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Find account by email
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Save account
    async fn save_account(&self, account: &Account) -> Success;
}
