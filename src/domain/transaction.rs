//! Transactions and transaction kinds

use crate::error::{Result, SpendwiseError};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Lowercase name used in record files
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = SpendwiseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(SpendwiseError::InvalidKind(s.to_string())),
        }
    }
}

/// A single income or expense entry.
///
/// The date is an opaque label; it is never validated on entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// Parse a user or file supplied amount, rejecting anything that is not > 0
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let amount = Decimal::from_str(raw.trim())
        .map_err(|_| SpendwiseError::InvalidAmount(raw.to_string()))?;
    ensure_positive(amount)?;
    Ok(amount)
}

/// Reject zero and negative amounts
pub fn ensure_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(SpendwiseError::InvalidAmount(amount.to_string()));
    }
    Ok(())
}

/// Format an amount with exactly two decimal places
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}
