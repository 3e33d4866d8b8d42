use super::account::{Account, AccountId, Amount};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts the account unless its id is already taken.
    async fn create(&self, account: Account) -> Result<()>;
    async fn get(&self, id: &AccountId) -> Result<Option<Account>>;
    async fn all_accounts(&self) -> Result<Vec<Account>>;
    /// Drops every account. Test and reset use only.
    async fn clear(&self) -> Result<()>;
    /// Debits `source` then credits `destination`, each as its own atomic step.
    ///
    /// The balance check happens inside the debit step. If the debit fails
    /// neither account changes.
    async fn atomic_transfer(
        &self,
        source: &AccountId,
        destination: &AccountId,
        amount: Amount,
    ) -> Result<()>;
}

/// Receives a message for each party of a committed transfer.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify_about_transfer(&self, account: &Account, message: &str) -> Result<()>;
}

pub type AccountStoreBox = Box<dyn AccountStore>;
pub type NotificationSinkBox = Box<dyn NotificationSink>;
