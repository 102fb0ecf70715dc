//! Category analysis and spending alert use cases

use crate::domain::aggregate::{
    category_shares, category_totals, percentage_of_total, rank_by_amount_descending,
    saturating_sum, top_category,
};
use crate::domain::alert::{classify_category, classify_overall, savings_analysis};
use crate::domain::{
    BudgetTier, CategoryAggregate, CategoryShare, Ledger, LedgerTotals, MonthFilter, MonthKey,
    SavingsAnalysis, SpendingTier, TransactionKind,
};
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, LedgerRepository};
use rust_decimal::Decimal;

/// One budget limit compared with the month's spending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBudgetStatus {
    pub category: String,
    pub spent: Decimal,
    pub limit: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub tier: BudgetTier,
}

/// Income and expense breakdown by category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub month: Option<MonthKey>,
    pub income: Vec<CategoryShare>,
    pub expenses: Vec<CategoryShare>,
    pub top_expense: Option<CategoryAggregate>,
}

impl CategoryReport {
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }
}

/// Overall spending tier, budget statuses and savings for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingReport {
    pub month: MonthKey,
    pub totals: LedgerTotals,
    pub expense_percentage: Decimal,
    pub tier: SpendingTier,
    pub budgets: Vec<CategoryBudgetStatus>,
    pub savings: SavingsAnalysis,
}

impl SpendingReport {
    pub fn any_over_budget(&self) -> bool {
        self.budgets
            .iter()
            .any(|status| status.tier == BudgetTier::OverBudget)
    }
}

fn shares_for(
    ledger: &Ledger,
    kind: TransactionKind,
    filter: Option<&MonthFilter>,
) -> Vec<CategoryShare> {
    let totals = category_totals(ledger.transactions(), kind, filter);
    let total = saturating_sum(totals.values().copied());
    category_shares(&rank_by_amount_descending(&totals), total)
}

/// Build the category breakdown, optionally for a single month
pub fn build_category_report(
    ledger: &Ledger,
    month: Option<MonthKey>,
    filter: Option<&MonthFilter>,
) -> CategoryReport {
    let income = shares_for(ledger, TransactionKind::Income, filter);
    let expense_totals = category_totals(ledger.transactions(), TransactionKind::Expense, filter);
    let ranked = rank_by_amount_descending(&expense_totals);
    let expense_total = saturating_sum(expense_totals.values().copied());

    CategoryReport {
        month,
        income,
        expenses: category_shares(&ranked, expense_total),
        top_expense: top_category(&ranked).cloned(),
    }
}

/// Compare every budget limit with the spending selected by `filter`
pub fn budget_statuses(ledger: &Ledger, filter: &MonthFilter) -> Vec<CategoryBudgetStatus> {
    let spending = category_totals(ledger.transactions(), TransactionKind::Expense, Some(filter));

    ledger
        .budget_limits()
        .map(|limit| {
            let spent = spending
                .get(&limit.category)
                .copied()
                .unwrap_or(Decimal::ZERO);
            CategoryBudgetStatus {
                category: limit.category.clone(),
                spent,
                limit: limit.monthly_limit,
                remaining: limit.monthly_limit.saturating_sub(spent),
                percentage: percentage_of_total(spent, limit.monthly_limit),
                tier: classify_category(spent, limit.monthly_limit),
            }
        })
        .collect()
}

/// Budget status of a single category; `None` when it has no limit
pub fn budget_status(
    ledger: &Ledger,
    category: &str,
    filter: &MonthFilter,
) -> Option<CategoryBudgetStatus> {
    ledger.budget_limit(category)?;
    budget_statuses(ledger, filter)
        .into_iter()
        .find(|status| status.category == category)
}

/// Build the full spending report for a month
pub fn build_spending_report(ledger: &Ledger, month: MonthKey, filter: &MonthFilter) -> SpendingReport {
    let totals = ledger.totals();
    let expense_percentage = ledger.expense_percentage();

    SpendingReport {
        month,
        totals,
        expense_percentage,
        tier: classify_overall(expense_percentage),
        budgets: budget_statuses(ledger, filter),
        savings: savings_analysis(totals.income, totals.expenses),
    }
}

/// Service running analyses against the stored ledger
pub struct AnalysisService {
    repository: FileSystemRepository,
}

impl AnalysisService {
    pub fn new(repository: FileSystemRepository) -> Self {
        AnalysisService { repository }
    }

    /// Category breakdown for the whole ledger or one month
    pub fn categories(&self, month: Option<MonthKey>) -> Result<CategoryReport> {
        let config = self.repository.load_config()?;
        let ledger = self.repository.load_ledger(&config)?;
        let filter = month.map(|key| config.get_month_match().filter_for(key));

        Ok(build_category_report(&ledger, month, filter.as_ref()))
    }

    /// Spending tier, budget statuses and savings for a month
    pub fn spending(&self, month: MonthKey) -> Result<SpendingReport> {
        let config = self.repository.load_config()?;
        let ledger = self.repository.load_ledger(&config)?;
        let filter = config.get_month_match().filter_for(month);

        tracing::debug!(%month, ?filter, "building spending report");
        Ok(build_spending_report(&ledger, month, &filter))
    }
}
