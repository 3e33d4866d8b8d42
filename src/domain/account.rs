use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, SubAssign};

/// Caller-assigned account identifier. Immutable once the account exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents a monetary value held by an account.
///
/// This is a wrapper around `rust_decimal::Decimal` so that balances never go
/// through binary floating point.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Balance(pub Decimal);

/// Represents a strictly positive amount moved by a transfer.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Builds an opening balance, refusing anything below zero.
    pub fn new(amount: Decimal) -> Result<Self, LedgerError> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::ValidationError(
                "Initial balance must not be negative".to_string(),
            ));
        }
        Ok(Self(amount))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Balance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Balance::ZERO, Add::add)
    }
}

/// State of a single ledger account.
///
/// Instances live inside the account store; callers only ever see clones.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Account {
    #[serde(rename = "account")]
    pub id: AccountId,
    #[serde(serialize_with = "serialize_normalized")]
    pub balance: Balance,
}

fn serialize_normalized<S>(balance: &Balance, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    Serialize::serialize(&balance.0.normalize(), serializer)
}

impl Account {
    pub fn new(id: impl Into<AccountId>, balance: Balance) -> Self {
        Self {
            id: id.into(),
            balance,
        }
    }

    /// Removes funds if the current balance covers them.
    ///
    /// On failure the balance is left as it was.
    pub fn debit(&mut self, amount: Amount) -> Result<(), LedgerError> {
        let amount = Balance::from(amount);
        if self.balance >= amount {
            self.balance -= amount;
            Ok(())
        } else {
            Err(LedgerError::InsufficientBalance(self.id.clone()))
        }
    }

    /// Adds funds, refusing a result that would not fit in a `Decimal`.
    pub fn credit(&mut self, amount: Amount) -> Result<(), LedgerError> {
        self.balance = self
            .balance
            .checked_add(amount.into())
            .ok_or_else(|| LedgerError::BalanceOverflow(self.id.clone()))?;
        Ok(())
    }
}
