//! Budget limit use cases

use crate::domain::transaction::parse_amount;
use crate::domain::BudgetLimit;
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, LedgerRepository};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetChange {
    pub limit: BudgetLimit,
    pub previous: Option<Decimal>,
}

pub struct BudgetService {
    repository: FileSystemRepository,
}

impl BudgetService {
    pub fn new(repository: FileSystemRepository) -> Self {
        BudgetService { repository }
    }

    /// Create or replace the monthly limit for a category
    pub fn set(&self, category: &str, limit: &str) -> Result<BudgetChange> {
        let monthly_limit = parse_amount(limit)?;

        let config = self.repository.load_config()?;
        let mut ledger = self.repository.load_ledger_for_update(&config)?;
        let previous = ledger.set_budget_limit(category, monthly_limit)?;
        self.repository.save_ledger(&config, &ledger)?;

        if let Some(old) = previous {
            tracing::info!(category, %old, new = %monthly_limit, "replaced budget limit");
        }

        Ok(BudgetChange {
            limit: BudgetLimit {
                category: category.to_string(),
                monthly_limit,
            },
            previous,
        })
    }

    /// All limits in the order they were first set
    pub fn list(&self) -> Result<Vec<BudgetLimit>> {
        let config = self.repository.load_config()?;
        let ledger = self.repository.load_ledger(&config)?;
        Ok(ledger.budget_limits().cloned().collect())
    }
}
