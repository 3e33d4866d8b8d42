use crate::domain::account::AccountId;
use crate::domain::transfer::TransferRequest;
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Create,
    Transfer,
}

/// One raw CSV row: `type, account, destination, amount`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CommandRecord {
    pub r#type: CommandType,
    pub account: String,
    pub destination: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
}

/// A ledger operation whose input shape has been checked.
#[derive(Debug, PartialEq, Clone)]
pub enum LedgerCommand {
    CreateAccount {
        id: AccountId,
        initial_balance: Decimal,
    },
    Transfer(TransferRequest),
}

impl TryFrom<CommandRecord> for LedgerCommand {
    type Error = LedgerError;

    fn try_from(record: CommandRecord) -> Result<Self> {
        if record.account.is_empty() {
            return Err(LedgerError::ValidationError(
                "account id must not be empty".to_string(),
            ));
        }

        match record.r#type {
            CommandType::Create => {
                let initial_balance = record.amount.ok_or_else(|| {
                    LedgerError::ValidationError("create requires an amount".to_string())
                })?;
                Ok(LedgerCommand::CreateAccount {
                    id: AccountId::new(record.account),
                    initial_balance,
                })
            }
            CommandType::Transfer => {
                let destination = record
                    .destination
                    .filter(|d| !d.is_empty())
                    .ok_or_else(|| {
                        LedgerError::ValidationError(
                            "transfer requires a destination account".to_string(),
                        )
                    })?;
                let amount = record.amount.ok_or_else(|| {
                    LedgerError::ValidationError("transfer requires an amount".to_string())
                })?;
                Ok(LedgerCommand::Transfer(TransferRequest::new(
                    record.account,
                    destination,
                    amount,
                )))
            }
        }
    }
}

/// Reads ledger commands from a CSV source.
///
/// Handles whitespace trimming and flexible record lengths, and rejects rows
/// whose shape does not fit the command type before they reach the engine.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and checks commands.
    pub fn commands(self) -> impl Iterator<Item = Result<LedgerCommand>> {
        self.reader.into_deserialize().map(|result| {
            let record: CommandRecord = result.map_err(LedgerError::from)?;
            LedgerCommand::try_from(record)
        })
    }
}
