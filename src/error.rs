use crate::domain::account::AccountId;
use crate::domain::transfer::TransferViolation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Account id {0} already exists!")]
    DuplicateAccountId(AccountId),
    #[error("Invalid transfer: [{}]", join_violations(.0))]
    InvalidTransfer(Vec<TransferViolation>),
    #[error("The source account {0} has not enough balance!")]
    InsufficientBalance(AccountId),
    #[error("Balance of account {0} would overflow")]
    BalanceOverflow(AccountId),
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Notification error: {0}")]
    NotificationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

fn join_violations(violations: &[TransferViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transfer_lists_every_violation() {
        let err = LedgerError::InvalidTransfer(vec![
            TransferViolation::AccountMissing,
            TransferViolation::NonPositiveAmount,
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid transfer: [origin and/or destination account does not exist, \
             transfer amount must be greater than 0]"
        );
    }

    #[test]
    fn test_duplicate_account_message() {
        let err = LedgerError::DuplicateAccountId(AccountId::from("Id-123"));
        assert_eq!(err.to_string(), "Account id Id-123 already exists!");
    }
}
