//! spendwise - Personal finance ledger
//!
//! A command-line tool that records income and expenses, aggregates them by
//! category and month, compares spending against monthly budget limits and
//! classifies it into alert tiers. State lives in plain CSV files next to a
//! `.spendwise/` marker directory.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use error::SpendwiseError;
