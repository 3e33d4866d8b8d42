use crate::domain::account::{Account, AccountId, Amount, Balance};
use crate::domain::ports::AccountStore;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// A thread-safe in-memory store for ledger accounts.
///
/// Backed by a sharded `DashMap`, so each mutation only locks the shard that
/// holds the account. At most one entry guard is alive at any time, which
/// rules out lock-ordering deadlocks between transfers running in opposite
/// directions.
///
/// The synchronous methods are usable from plain threads; the `AccountStore`
/// impl delegates to them. None of them await while holding a guard.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<DashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_if_absent(&self, account: Account) -> Result<()> {
        if account.balance < Balance::ZERO {
            return Err(LedgerError::ValidationError(
                "Initial balance must not be negative".to_string(),
            ));
        }
        match self.accounts.entry(account.id.clone()) {
            Entry::Occupied(existing) => {
                Err(LedgerError::DuplicateAccountId(existing.key().clone()))
            }
            Entry::Vacant(slot) => {
                tracing::debug!(account = %account.id, balance = %account.balance.value(), "account created");
                slot.insert(account);
                Ok(())
            }
        }
    }

    pub fn snapshot(&self, id: &AccountId) -> Option<Account> {
        self.accounts.get(id).map(|entry| entry.value().clone())
    }

    pub fn snapshot_all(&self) -> Vec<Account> {
        self.accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn remove_all(&self) {
        self.accounts.clear();
    }

    /// Moves `amount` from `source` to `destination`.
    ///
    /// The debit and the credit are two separate critical sections. Funds
    /// debited from `source` are not rolled back if `destination` vanishes
    /// before the credit lands. A credit refused for overflow puts the debit
    /// back on `source`.
    pub fn move_funds(&self, source: &AccountId, destination: &AccountId, amount: Amount) -> Result<()> {
        if !self.accounts.contains_key(destination) {
            return Err(LedgerError::AccountNotFound(destination.clone()));
        }

        {
            let mut source_account = self
                .accounts
                .get_mut(source)
                .ok_or_else(|| LedgerError::AccountNotFound(source.clone()))?;
            source_account.debit(amount)?;
        }

        let credited = match self.accounts.get_mut(destination) {
            Some(mut destination_account) => destination_account.credit(amount),
            None => {
                tracing::warn!(
                    source = %source,
                    destination = %destination,
                    amount = %amount,
                    "destination vanished after debit, funds lost in flight"
                );
                return Err(LedgerError::AccountNotFound(destination.clone()));
            }
        };

        if let Err(err) = credited {
            self.refund(source, amount);
            return Err(err);
        }
        Ok(())
    }

    /// Puts a debited amount back on `source` after its credit was refused.
    fn refund(&self, source: &AccountId, amount: Amount) {
        let refunded = self
            .accounts
            .get_mut(source)
            .map(|mut source_account| source_account.credit(amount));
        if !matches!(refunded, Some(Ok(()))) {
            tracing::warn!(
                source = %source,
                amount = %amount,
                "refund after refused credit failed, funds lost in flight"
            );
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, account: Account) -> Result<()> {
        self.insert_if_absent(account)
    }

    async fn get(&self, id: &AccountId) -> Result<Option<Account>> {
        Ok(self.snapshot(id))
    }

    async fn all_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.snapshot_all())
    }

    async fn clear(&self) -> Result<()> {
        self.remove_all();
        Ok(())
    }

    async fn atomic_transfer(
        &self,
        source: &AccountId,
        destination: &AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.move_funds(source, destination, amount)
    }
}
