use crate::domain::account::Account;
use crate::error::Result;
use std::io::Write;

/// Writes account snapshots as `account,balance` CSV rows.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_accounts(&mut self, accounts: impl IntoIterator<Item = Account>) -> Result<()> {
        let mut wrote_any = false;
        for account in accounts {
            self.writer.serialize(&account)?;
            wrote_any = true;
        }
        if !wrote_any {
            self.writer.write_record(["account", "balance"])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
