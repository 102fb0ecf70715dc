//! Record a single transaction

use crate::application::analysis::{budget_status, CategoryBudgetStatus};
use crate::domain::transaction::parse_amount;
use crate::domain::{LedgerTotals, MonthKey, Transaction, TransactionKind};
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, LedgerRepository};
use chrono::NaiveDate;
use std::str::FromStr;

/// Raw transaction fields as entered by the user
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    /// Defaults to today as `YYYY-MM-DD`
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub transaction: Transaction,
    pub totals: LedgerTotals,
    /// Month the budget status was computed for
    pub month: MonthKey,
    /// Present when the category has a budget limit
    pub budget: Option<CategoryBudgetStatus>,
}

pub struct AddTransactionService {
    repository: FileSystemRepository,
}

impl AddTransactionService {
    pub fn new(repository: FileSystemRepository) -> Self {
        AddTransactionService { repository }
    }

    /// Validate, append and save. Nothing is written when validation fails.
    pub fn execute(&self, input: NewTransaction, today: NaiveDate) -> Result<AddOutcome> {
        let kind = TransactionKind::from_str(&input.kind)?;
        let amount = parse_amount(&input.amount)?;

        let config = self.repository.load_config()?;
        let mut ledger = self.repository.load_ledger_for_update(&config)?;

        let date = input
            .date
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
        let month = MonthKey::from_label(&date).unwrap_or_else(|| MonthKey::from_date(today));

        let transaction = ledger
            .add_transaction(date, input.description, amount, input.category, kind)?
            .clone();
        self.repository.save_ledger(&config, &ledger)?;

        let filter = config.get_month_match().filter_for(month);
        let budget = if transaction.is_expense() {
            budget_status(&ledger, &transaction.category, &filter)
        } else {
            None
        };

        Ok(AddOutcome {
            transaction,
            totals: ledger.totals(),
            month,
            budget,
        })
    }
}
