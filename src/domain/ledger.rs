//! Ledger aggregate root
//!
//! The ledger owns the transaction list, the budget limits and the running
//! income/expense totals. Totals are only ever changed by
//! [`Ledger::add_transaction`], so they always equal a fold over the
//! transaction list; [`Ledger::verify_totals`] checks exactly that.

use crate::domain::aggregate::percentage_of_total;
use crate::domain::transaction::{ensure_positive, parse_amount, Transaction, TransactionKind};
use crate::error::{Result, SpendwiseError};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::str::FromStr;

/// A monthly spending cap for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLimit {
    pub category: String,
    pub monthly_limit: Decimal,
}

/// Income and expense sums
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl LedgerTotals {
    /// Totals with `amount` added; `None` if the sum would overflow
    fn checked_record(&self, kind: TransactionKind, amount: Decimal) -> Option<LedgerTotals> {
        let mut next = *self;
        match kind {
            TransactionKind::Income => next.income = self.income.checked_add(amount)?,
            TransactionKind::Expense => next.expenses = self.expenses.checked_add(amount)?,
        }
        Some(next)
    }

    fn saturating_record(&mut self, kind: TransactionKind, amount: Decimal) {
        match kind {
            TransactionKind::Income => self.income = self.income.saturating_add(amount),
            TransactionKind::Expense => self.expenses = self.expenses.saturating_add(amount),
        }
    }

    pub fn net_balance(&self) -> Decimal {
        self.income - self.expenses
    }
}

/// Unvalidated transaction fields as read from a delimited row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionRecord {
    /// 1-based line in the source file; 0 when not read from a file
    pub line: u64,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub kind: String,
}

/// Unvalidated budget limit fields as read from a delimited row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetRecord {
    pub line: u64,
    pub category: String,
    pub monthly_limit: String,
}

/// Outcome of a bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub attempted: usize,
    pub succeeded: usize,
    /// Line of the first record that was skipped
    pub first_skipped_line: Option<u64>,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.attempted - self.succeeded
    }

    /// Combine two reports, e.g. per-file loads
    pub fn merge(self, other: LoadReport) -> LoadReport {
        LoadReport {
            attempted: self.attempted + other.attempted,
            succeeded: self.succeeded + other.succeeded,
            first_skipped_line: self.first_skipped_line.or(other.first_skipped_line),
        }
    }
}

/// In-memory transactions, budget limits and running totals
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    budget_limits: IndexMap<String, BudgetLimit>,
    totals: LedgerTotals,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction and update the matching total.
    ///
    /// Fails with `InvalidAmount` for zero or negative amounts and for amounts
    /// that would overflow the running total; the ledger is left untouched in
    /// either case.
    pub fn add_transaction(
        &mut self,
        date: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        kind: TransactionKind,
    ) -> Result<&Transaction> {
        ensure_positive(amount)?;
        let totals = self.totals.checked_record(kind, amount).ok_or_else(|| {
            SpendwiseError::InvalidAmount(format!("{} overflows the {} total", amount, kind))
        })?;

        self.totals = totals;
        self.transactions.push(Transaction {
            date: date.into(),
            description: description.into(),
            amount,
            category: category.into(),
            kind,
        });

        let index = self.transactions.len() - 1;
        Ok(&self.transactions[index])
    }

    /// Create or replace the monthly limit for a category.
    ///
    /// Returns the previous limit when one was replaced.
    pub fn set_budget_limit(
        &mut self,
        category: impl Into<String>,
        monthly_limit: Decimal,
    ) -> Result<Option<Decimal>> {
        ensure_positive(monthly_limit)?;

        let category = category.into();
        let previous = self.budget_limits.insert(
            category.clone(),
            BudgetLimit {
                category,
                monthly_limit,
            },
        );
        Ok(previous.map(|limit| limit.monthly_limit))
    }

    /// Add every record that validates, skipping the rest.
    ///
    /// Kinds are matched case-insensitively. Skipped records are counted in
    /// the report, never treated as fatal.
    pub fn bulk_load<I>(&mut self, records: I) -> LoadReport
    where
        I: IntoIterator<Item = TransactionRecord>,
    {
        let mut report = LoadReport::default();

        for record in records {
            report.attempted += 1;
            let line = record.line;
            match self.add_record(record) {
                Ok(()) => report.succeeded += 1,
                Err(e) => {
                    tracing::debug!(line, error = %e, "skipping transaction record");
                    report.first_skipped_line.get_or_insert(line);
                }
            }
        }

        report
    }

    /// Set every budget limit that validates, skipping the rest.
    ///
    /// A category that appears twice ends up with the later value.
    pub fn bulk_load_budget_limits<I>(&mut self, records: I) -> LoadReport
    where
        I: IntoIterator<Item = BudgetRecord>,
    {
        let mut report = LoadReport::default();

        for record in records {
            report.attempted += 1;
            let line = record.line;
            let result = parse_amount(&record.monthly_limit)
                .and_then(|limit| self.set_budget_limit(record.category, limit));
            match result {
                Ok(_) => report.succeeded += 1,
                Err(e) => {
                    tracing::debug!(line, error = %e, "skipping budget record");
                    report.first_skipped_line.get_or_insert(line);
                }
            }
        }

        report
    }

    fn add_record(&mut self, record: TransactionRecord) -> Result<()> {
        let kind = TransactionKind::from_str(&record.kind)?;
        let amount = parse_amount(&record.amount)?;
        self.add_transaction(
            record.date,
            record.description,
            amount,
            record.category,
            kind,
        )?;
        Ok(())
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn budget_limit(&self, category: &str) -> Option<&BudgetLimit> {
        self.budget_limits.get(category)
    }

    /// Budget limits in the order they were first set
    pub fn budget_limits(&self) -> impl Iterator<Item = &BudgetLimit> {
        self.budget_limits.values()
    }

    pub fn has_budget_limits(&self) -> bool {
        !self.budget_limits.is_empty()
    }

    pub fn totals(&self) -> LedgerTotals {
        self.totals
    }

    pub fn net_balance(&self) -> Decimal {
        self.totals.net_balance()
    }

    /// Expenses as a percentage of income; 0 when there is no income
    pub fn expense_percentage(&self) -> Decimal {
        percentage_of_total(self.totals.expenses, self.totals.income)
    }

    /// Recompute totals from scratch by folding the transaction list
    pub fn recompute_totals(&self) -> LedgerTotals {
        self.transactions
            .iter()
            .fold(LedgerTotals::default(), |mut totals, t| {
                totals.saturating_record(t.kind, t.amount);
                totals
            })
    }

    /// Check that the running totals still match the transaction list
    pub fn verify_totals(&self) -> Result<()> {
        let recomputed = self.recompute_totals();
        if recomputed != self.totals {
            return Err(SpendwiseError::TotalsMismatch(format!(
                "running income {} / expenses {}, recomputed {} / {}",
                self.totals.income, self.totals.expenses, recomputed.income, recomputed.expenses
            )));
        }
        Ok(())
    }
}
