use crate::domain::account::Account;
use crate::domain::ports::NotificationSink;
use crate::error::Result;
use async_trait::async_trait;

/// Default notification sink: emits one log event per message.
#[derive(Debug, Default, Clone)]
pub struct LoggingNotificationSink;

impl LoggingNotificationSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for LoggingNotificationSink {
    async fn notify_about_transfer(&self, account: &Account, message: &str) -> Result<()> {
        tracing::info!(account = %account.id, message, "transfer notification");
        Ok(())
    }
}
