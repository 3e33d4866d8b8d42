use crate::domain::account::{Account, AccountId, Amount, Balance};
use crate::domain::ports::{AccountStoreBox, NotificationSinkBox};
use crate::domain::transfer::{TransferRequest, validate_transfer};
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::Instrument;

pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_millis(500);

/// The main entry point for ledger operations.
///
/// `LedgerEngine` owns the account store and the notification sink. It can be
/// shared between tasks (e.g. behind an `Arc`); all coordination between
/// concurrent transfers happens inside the store.
pub struct LedgerEngine {
    account_store: AccountStoreBox,
    notification_sink: NotificationSinkBox,
    notify_timeout: Duration,
}

impl LedgerEngine {
    /// Creates a new `LedgerEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `account_store` - The store owning every account.
    /// * `notification_sink` - Told about each committed transfer.
    pub fn new(account_store: AccountStoreBox, notification_sink: NotificationSinkBox) -> Self {
        Self {
            account_store,
            notification_sink,
            notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }

    /// Upper bound for a single notification call.
    pub fn with_notify_timeout(mut self, notify_timeout: Duration) -> Self {
        self.notify_timeout = notify_timeout;
        self
    }

    pub async fn create_account(
        &self,
        id: impl Into<AccountId>,
        initial_balance: Decimal,
    ) -> Result<()> {
        let account = Account::new(id, Balance::new(initial_balance)?);
        tracing::info!(account = %account.id, "creating account");
        self.account_store.create(account).await
    }

    pub async fn get_account(&self, id: &AccountId) -> Result<Option<Account>> {
        self.account_store.get(id).await
    }

    /// Validates and applies a transfer, then notifies both parties.
    ///
    /// Returns `InvalidTransfer` with every broken rule when the request is
    /// malformed, and `InsufficientBalance` when it is well formed but the
    /// source cannot cover it right now. Notification problems never fail
    /// the call.
    pub async fn transfer(&self, request: TransferRequest) -> Result<()> {
        let span = tracing::info_span!(
            "transfer",
            source = %request.source_account_id,
            destination = %request.destination_account_id,
            amount = %request.amount
        );
        self.run_transfer(request).instrument(span).await
    }

    async fn run_transfer(&self, request: TransferRequest) -> Result<()> {
        tracing::debug!(stage = "validating");
        let source = self.account_store.get(&request.source_account_id).await?;
        let destination = self
            .account_store
            .get(&request.destination_account_id)
            .await?;

        let violations = validate_transfer(&request, source.as_ref(), destination.as_ref());
        if !violations.is_empty() {
            tracing::debug!(stage = "rejected", ?violations);
            return Err(LedgerError::InvalidTransfer(violations));
        }

        tracing::debug!(stage = "mutating");
        let amount = Amount::new(request.amount)?;
        if let Err(err) = self
            .account_store
            .atomic_transfer(
                &request.source_account_id,
                &request.destination_account_id,
                amount,
            )
            .await
        {
            tracing::debug!(stage = "rejected", error = %err);
            return Err(err);
        }
        tracing::info!(stage = "committed");

        tracing::debug!(stage = "notifying");
        self.notify_transfer(&request, amount).await;
        tracing::debug!(stage = "done");
        Ok(())
    }

    async fn notify_transfer(&self, request: &TransferRequest, amount: Amount) {
        let source = self.account_store.get(&request.source_account_id).await;
        let destination = self
            .account_store
            .get(&request.destination_account_id)
            .await;

        let (source, destination) = match (source, destination) {
            (Ok(Some(source)), Ok(Some(destination))) => (source, destination),
            _ => {
                tracing::warn!("accounts unavailable after commit, skipping notifications");
                return;
            }
        };

        self.notify(&source, &format!("{} sent to {}", amount, destination.id))
            .await;
        self.notify(
            &destination,
            &format!("{} received from {}", amount, source.id),
        )
        .await;
    }

    async fn notify(&self, account: &Account, message: &str) {
        let delivery = self
            .notification_sink
            .notify_about_transfer(account, message);
        match tokio::time::timeout(self.notify_timeout, delivery).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(account = %account.id, error = %err, "notification failed");
            }
            Err(_) => {
                tracing::warn!(
                    account = %account.id,
                    timeout = ?self.notify_timeout,
                    "notification timed out"
                );
            }
        }
    }

    /// Removes every account. Intended for resetting state between runs.
    pub async fn clear_accounts(&self) -> Result<()> {
        self.account_store.clear().await
    }

    /// Consumes the engine and returns the final state of all accounts,
    /// ordered by id.
    pub async fn into_results(self) -> Result<Vec<Account>> {
        let mut accounts = self.account_store.all_accounts().await?;
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(accounts)
    }
}
