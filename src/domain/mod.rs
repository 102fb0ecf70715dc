//! Domain layer - Ledger, aggregation and alert classification

pub mod aggregate;
pub mod alert;
pub mod ledger;
pub mod month;
pub mod transaction;

pub use aggregate::{CategoryAggregate, CategoryShare};
pub use alert::{BudgetTier, SavingsAnalysis, ShareLevel, SpendingTier};
pub use ledger::{
    BudgetLimit, BudgetRecord, Ledger, LedgerTotals, LoadReport, TransactionRecord,
};
pub use month::{MonthFilter, MonthKey, MonthMatch, MonthReference};
pub use transaction::{Transaction, TransactionKind};
