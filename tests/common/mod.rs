#![allow(dead_code)]

use async_trait::async_trait;
use concurrent_ledger::application::engine::LedgerEngine;
use concurrent_ledger::domain::account::Account;
use concurrent_ledger::domain::ports::NotificationSink;
use concurrent_ledger::error::Result;
use concurrent_ledger::infrastructure::in_memory::InMemoryAccountStore;
use rust_decimal::Decimal;
use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Sink that remembers every (account, message) pair it receives.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub messages: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingSink {
    pub fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify_about_transfer(&self, account: &Account, message: &str) -> Result<()> {
        self.messages
            .lock()
            .unwrap()
            .push((account.id.to_string(), message.to_string()));
        Ok(())
    }
}

/// Engine over a fresh in-memory store with the given opening balances.
pub async fn engine_with(accounts: &[(&str, Decimal)], sink: RecordingSink) -> LedgerEngine {
    let engine = LedgerEngine::new(Box::new(InMemoryAccountStore::new()), Box::new(sink));
    for (id, balance) in accounts {
        engine.create_account(*id, *balance).await.unwrap();
    }
    engine
}

/// Writes `accounts` create rows followed by `transfers` ring transfers of 1.
pub fn generate_commands_csv(path: &Path, accounts: usize, transfers: usize) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["type", "account", "destination", "amount"])?;
    for i in 0..accounts {
        let id = format!("acc-{}", i);
        wtr.write_record(["create", id.as_str(), "", "1000"])?;
    }
    for i in 0..transfers {
        let from = format!("acc-{}", i % accounts);
        let to = format!("acc-{}", (i + 1) % accounts);
        wtr.write_record(["transfer", from.as_str(), to.as_str(), "1"])?;
    }

    wtr.flush()?;
    Ok(())
}
