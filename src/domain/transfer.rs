use super::account::{Account, AccountId};
use rust_decimal::Decimal;
use thiserror::Error;

/// A request to move `amount` from one account to another.
///
/// Transient: lives only for the duration of a single transfer call.
#[derive(Debug, PartialEq, Clone)]
pub struct TransferRequest {
    pub source_account_id: AccountId,
    pub destination_account_id: AccountId,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(
        source_account_id: impl Into<AccountId>,
        destination_account_id: impl Into<AccountId>,
        amount: Decimal,
    ) -> Self {
        Self {
            source_account_id: source_account_id.into(),
            destination_account_id: destination_account_id.into(),
            amount,
        }
    }
}

/// Business rule broken by a transfer request.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum TransferViolation {
    #[error("origin and/or destination account does not exist")]
    AccountMissing,
    #[error("transfer amount must be greater than 0")]
    NonPositiveAmount,
    #[error("origin and destination account cannot be equal")]
    SameAccount,
}

/// Checks a transfer request against the business rules.
///
/// Every rule is evaluated so the caller sees all violations at once. Balance
/// sufficiency is left to the store, which checks it under the account lock.
pub fn validate_transfer(
    request: &TransferRequest,
    source: Option<&Account>,
    destination: Option<&Account>,
) -> Vec<TransferViolation> {
    let mut violations = Vec::new();

    if source.is_none() || destination.is_none() {
        violations.push(TransferViolation::AccountMissing);
    }
    if request.amount <= Decimal::ZERO {
        violations.push(TransferViolation::NonPositiveAmount);
    }
    if request.source_account_id == request.destination_account_id {
        violations.push(TransferViolation::SameAccount);
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Balance;
    use rust_decimal_macros::dec;

    fn account(id: &str, balance: Decimal) -> Account {
        Account::new(id, Balance(balance))
    }

    #[test]
    fn test_valid_transfer_has_no_violations() {
        let source = account("A", dec!(100));
        let destination = account("B", dec!(0));
        let request = TransferRequest::new("A", "B", dec!(50));

        assert!(validate_transfer(&request, Some(&source), Some(&destination)).is_empty());
    }

    #[test]
    fn test_balance_is_not_checked() {
        let source = account("A", dec!(1));
        let destination = account("B", dec!(0));
        let request = TransferRequest::new("A", "B", dec!(500));

        assert!(validate_transfer(&request, Some(&source), Some(&destination)).is_empty());
    }

    #[test]
    fn test_missing_destination() {
        let source = account("A", dec!(100));
        let request = TransferRequest::new("A", "nope", dec!(1));

        assert_eq!(
            validate_transfer(&request, Some(&source), None),
            vec![TransferViolation::AccountMissing]
        );
    }

    #[test]
    fn test_missing_source_and_zero_amount_reports_both() {
        let destination = account("B", dec!(0));
        let request = TransferRequest::new("ghost", "B", dec!(0));

        let violations = validate_transfer(&request, None, Some(&destination));
        assert_eq!(
            violations,
            vec![
                TransferViolation::AccountMissing,
                TransferViolation::NonPositiveAmount
            ]
        );
    }

    #[test]
    fn test_negative_amount() {
        let source = account("A", dec!(100));
        let destination = account("B", dec!(100));
        let request = TransferRequest::new("A", "B", dec!(-50));

        assert_eq!(
            validate_transfer(&request, Some(&source), Some(&destination)),
            vec![TransferViolation::NonPositiveAmount]
        );
    }

    #[test]
    fn test_self_transfer_rejected_regardless_of_balance() {
        let source = account("A", dec!(1000000));
        let request = TransferRequest::new("A", "A", dec!(1));

        assert_eq!(
            validate_transfer(&request, Some(&source), Some(&source)),
            vec![TransferViolation::SameAccount]
        );
    }

    #[test]
    fn test_all_rules_broken() {
        let request = TransferRequest::new("X", "X", dec!(-1));

        assert_eq!(
            validate_transfer(&request, None, None),
            vec![
                TransferViolation::AccountMissing,
                TransferViolation::NonPositiveAmount,
                TransferViolation::SameAccount
            ]
        );
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            TransferViolation::SameAccount.to_string(),
            "origin and destination account cannot be equal"
        );
        assert_eq!(
            TransferViolation::NonPositiveAmount.to_string(),
            "transfer amount must be greater than 0"
        );
        assert_eq!(
            TransferViolation::AccountMissing.to_string(),
            "origin and/or destination account does not exist"
        );
    }
}
