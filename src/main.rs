use clap::Parser;
use concurrent_ledger::application::engine::LedgerEngine;
use concurrent_ledger::domain::ports::{AccountStoreBox, NotificationSinkBox};
use concurrent_ledger::infrastructure::in_memory::InMemoryAccountStore;
use concurrent_ledger::infrastructure::notification::LoggingNotificationSink;
use concurrent_ledger::interfaces::csv::account_writer::AccountWriter;
use concurrent_ledger::interfaces::csv::command_reader::{CommandReader, LedgerCommand};
use concurrent_ledger::logging::init_logging;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input commands CSV file (`type, account, destination, amount`)
    input: PathBuf,

    /// Upper bound for each transfer notification, in milliseconds
    #[arg(long, default_value_t = 500)]
    notify_timeout_ms: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let account_store: AccountStoreBox = Box::new(InMemoryAccountStore::new());
    let notification_sink: NotificationSinkBox = Box::new(LoggingNotificationSink::new());
    let engine = LedgerEngine::new(account_store, notification_sink)
        .with_notify_timeout(Duration::from_millis(cli.notify_timeout_ms));

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for command in reader.commands() {
        let outcome = match command {
            Ok(LedgerCommand::CreateAccount {
                id,
                initial_balance,
            }) => engine.create_account(id, initial_balance).await,
            Ok(LedgerCommand::Transfer(request)) => engine.transfer(request).await,
            Err(e) => {
                eprintln!("Error reading command: {}", e);
                continue;
            }
        };
        if let Err(e) = outcome {
            eprintln!("Error processing command: {}", e);
        }
    }

    let accounts = engine.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = AccountWriter::new(stdout.lock());
    writer.write_accounts(accounts).into_diagnostic()?;

    Ok(())
}
