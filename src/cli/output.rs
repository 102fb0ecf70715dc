//! Output formatting utilities

use crate::application::{
    AddOutcome, BudgetChange, CategoryReport, ExportOutcome, ImportOutcome, SpendingReport,
};
use crate::domain::alert::SAVINGS_TARGET_PERCENT;
use crate::domain::transaction::format_amount;
use crate::domain::{BudgetLimit, CategoryShare, LedgerTotals, ShareLevel, SpendingTier, Transaction};
use crate::infrastructure::Config;
use rust_decimal::{Decimal, RoundingStrategy};
use std::path::Path;

fn money(amount: Decimal) -> String {
    format!("${}", format_amount(amount))
}

/// Percentage with one decimal place, e.g. `55.6%`
pub fn format_percent(percentage: Decimal) -> String {
    let mut rounded = percentage.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    format!("{}%", rounded)
}

fn totals_block(totals: &LedgerTotals) -> String {
    format!(
        "Total income: {}\nTotal expenses: {}\nBalance: {}\n",
        money(totals.income),
        money(totals.expenses),
        money(totals.net_balance())
    )
}

/// Format transactions as a table
pub fn format_transaction_list(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found\n".to_string();
    }

    let mut output = format!(
        "{:<20}{:<30}{:>12}  {:<15}{}\n",
        "Date", "Description", "Amount", "Category", "Type"
    );
    output.push_str(&format!("{}\n", "-".repeat(85)));

    for transaction in transactions {
        let date: String = transaction.date.chars().take(19).collect();
        let description: String = transaction.description.chars().take(29).collect();
        output.push_str(&format!(
            "{:<20}{:<30}{:>12}  {:<15}{}\n",
            date,
            description,
            money(transaction.amount),
            transaction.category,
            transaction.kind
        ));
    }
    output.push_str(&format!("{} transaction(s)\n", transactions.len()));
    output
}

/// Confirmation for a recorded transaction
pub fn format_add_outcome(outcome: &AddOutcome) -> String {
    let transaction = &outcome.transaction;
    let mut output = format!(
        "Recorded {} of {} ({}) on {}\n",
        transaction.kind,
        money(transaction.amount),
        transaction.category,
        transaction.date
    );

    if let Some(status) = &outcome.budget {
        output.push_str(&format!(
            "{} budget for {}: {} of {} ({}) {}\n",
            status.category,
            outcome.month,
            money(status.spent),
            money(status.limit),
            format_percent(status.percentage),
            status.tier
        ));
    }

    output.push_str(&totals_block(&outcome.totals));
    output
}

/// Confirmation for `budget set`
pub fn format_budget_change(change: &BudgetChange) -> String {
    match change.previous {
        Some(previous) => format!(
            "Budget limit for '{}' updated from {} to {}",
            change.limit.category,
            money(previous),
            money(change.limit.monthly_limit)
        ),
        None => format!(
            "Budget limit set for '{}': {}",
            change.limit.category,
            money(change.limit.monthly_limit)
        ),
    }
}

/// Format budget limits, one per line
pub fn format_budget_list(limits: &[BudgetLimit]) -> String {
    if limits.is_empty() {
        return "No budget limits set\n".to_string();
    }

    let mut output = String::new();
    for limit in limits {
        output.push_str(&format!(
            "{}: {}\n",
            limit.category,
            money(limit.monthly_limit)
        ));
    }
    output
}

pub fn format_import(path: &Path, outcome: &ImportOutcome) -> String {
    let report = &outcome.report;
    let mut output = format!(
        "Imported {} of {} transactions from '{}'",
        report.succeeded,
        report.attempted,
        path.display()
    );
    if report.skipped() > 0 {
        output.push_str(&format!(" ({} skipped)", report.skipped()));
    }
    output.push('\n');
    output.push_str(&totals_block(&outcome.totals));
    output
}

pub fn format_export(path: &Path, outcome: &ExportOutcome) -> String {
    format!(
        "Exported {} transactions to '{}'",
        outcome.transactions,
        path.display()
    )
}

fn share_table(title: &str, shares: &[CategoryShare], flag_levels: bool) -> String {
    let mut output = format!("{}\n", title);
    output.push_str(&format!("{:<25}{:>12}  {}\n", "Category", "Amount", "Share"));
    output.push_str(&format!("{}\n", "-".repeat(50)));

    for share in shares {
        let flag = match (flag_levels, share.level) {
            (true, ShareLevel::High) => " HIGH",
            (true, ShareLevel::Medium) => " MEDIUM",
            _ => "",
        };
        output.push_str(&format!(
            "{:<25}{:>12}  {}{}\n",
            share.category,
            money(share.amount),
            format_percent(share.percentage),
            flag
        ));
    }
    output
}

/// Income and expense breakdown
pub fn format_category_report(report: &CategoryReport) -> String {
    if report.is_empty() {
        return match report.month {
            Some(month) => format!("No transactions found for {}\n", month),
            None => "No transactions found\n".to_string(),
        };
    }

    let mut output = match report.month {
        Some(month) => format!("Category analysis for {}\n", month),
        None => "Category analysis (all time)\n".to_string(),
    };

    if !report.income.is_empty() {
        output.push('\n');
        output.push_str(&share_table("Income by category:", &report.income, false));
    }

    if !report.expenses.is_empty() {
        output.push('\n');
        output.push_str(&share_table("Expenses by category:", &report.expenses, true));
    }

    if let (Some(top), Some(share)) = (&report.top_expense, report.expenses.first()) {
        output.push_str(&format!(
            "\nLargest expense category: {} ({}, {} of expenses)\n",
            top.category,
            money(top.amount),
            format_percent(share.percentage)
        ));
    }
    output
}

fn tier_advice(tier: SpendingTier) -> &'static str {
    match tier {
        SpendingTier::Critical => "Expenses are close to income. Cut non-essential spending now.",
        SpendingTier::Warning => "Consider reducing expenses and setting category budgets.",
        SpendingTier::Alert => "Monitor spending carefully.",
        SpendingTier::Good => "Spending is under control.",
    }
}

/// Spending tier, budget table and savings analysis
pub fn format_spending_report(report: &SpendingReport) -> String {
    let mut output = String::from("Spending analysis\n");
    output.push_str(&totals_block(&report.totals));
    output.push_str(&format!(
        "Expense percentage: {}\nStatus: {}\n{}\n",
        format_percent(report.expense_percentage),
        report.tier,
        tier_advice(report.tier)
    ));

    output.push('\n');
    if report.budgets.is_empty() {
        output.push_str("No budget limits set. Use 'spendwise budget set' to add one.\n");
    } else {
        output.push_str(&format!("Budget status for {}:\n", report.month));
        output.push_str(&format!(
            "{:<20}{:>12}{:>12}{:>12}{:>9}  {}\n",
            "Category", "Spent", "Limit", "Remaining", "Used", "Status"
        ));
        output.push_str(&format!("{}\n", "-".repeat(78)));
        for status in &report.budgets {
            output.push_str(&format!(
                "{:<20}{:>12}{:>12}{:>12}{:>9}  {}\n",
                status.category,
                money(status.spent),
                money(status.limit),
                money(status.remaining),
                format_percent(status.percentage),
                status.tier
            ));
        }
        if report.any_over_budget() {
            output.push_str("Budget exceeded in at least one category\n");
        }
    }

    let savings = &report.savings;
    output.push_str(&format!(
        "\nSavings target ({}% of income): {}\nCurrent savings: {}\n",
        SAVINGS_TARGET_PERCENT,
        money(savings.target),
        money(savings.actual)
    ));
    if savings.goal_met() {
        output.push_str("Savings goal met\n");
    } else {
        output.push_str(&format!(
            "Save {} more to reach the goal\n",
            money(savings.gap)
        ));
    }
    output
}

/// All config values as `key = value` lines
pub fn format_config(config: &Config) -> String {
    format!(
        "month_match = {}\ntransactions_file = {}\nbudget_file = {}\n",
        config.month_match, config.transactions_file, config.budget_file
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::analysis::{build_category_report, build_spending_report};
    use crate::domain::{Ledger, LoadReport, MonthKey, MonthMatch, TransactionKind};

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("2024-01-01", "Pay", dec(1000), "Salary", TransactionKind::Income)
            .unwrap();
        ledger
            .add_transaction("2024-01-03", "Market", dec(500), "Food", TransactionKind::Expense)
            .unwrap();
        ledger
            .add_transaction("2024-01-10", "Flat", dec(400), "Rent", TransactionKind::Expense)
            .unwrap();
        ledger
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Decimal::new(5555, 2)), "55.6%");
        assert_eq!(format_percent(dec(90)), "90.0%");
        assert_eq!(format_percent(Decimal::ZERO), "0.0%");
    }

    #[test]
    fn test_format_empty_transaction_list() {
        assert_eq!(format_transaction_list(&[]), "No transactions found\n");
    }

    #[test]
    fn test_format_transaction_list() {
        let ledger = ledger();
        let output = format_transaction_list(ledger.transactions());
        assert!(output.starts_with("Date"));
        assert!(output.contains("2024-01-03"));
        assert!(output.contains("$500.00"));
        assert!(output.contains("expense"));
        assert!(output.ends_with("3 transaction(s)\n"));
    }

    #[test]
    fn test_format_budget_change() {
        let limit = BudgetLimit {
            category: "Food".to_string(),
            monthly_limit: dec(350),
        };
        let created = BudgetChange {
            limit: limit.clone(),
            previous: None,
        };
        assert_eq!(
            format_budget_change(&created),
            "Budget limit set for 'Food': $350.00"
        );

        let replaced = BudgetChange {
            limit,
            previous: Some(dec(300)),
        };
        assert_eq!(
            format_budget_change(&replaced),
            "Budget limit for 'Food' updated from $300.00 to $350.00"
        );
    }

    #[test]
    fn test_format_budget_list() {
        assert_eq!(format_budget_list(&[]), "No budget limits set\n");
        let limits = vec![BudgetLimit {
            category: "Rent".to_string(),
            monthly_limit: Decimal::new(90050, 2),
        }];
        assert_eq!(format_budget_list(&limits), "Rent: $900.50\n");
    }

    #[test]
    fn test_format_import_with_skips() {
        let outcome = ImportOutcome {
            report: LoadReport {
                attempted: 3,
                succeeded: 2,
                first_skipped_line: Some(3),
            },
            totals: LedgerTotals::default(),
        };
        let output = format_import(Path::new("bank.csv"), &outcome);
        assert!(output.starts_with("Imported 2 of 3 transactions from 'bank.csv' (1 skipped)\n"));
    }

    #[test]
    fn test_format_category_report() {
        let report = build_category_report(&ledger(), None, None);
        let output = format_category_report(&report);

        assert!(output.contains("Income by category:"));
        assert!(output.contains("Food"));
        assert!(output.contains("55.6% HIGH"));
        assert!(output.contains("Largest expense category: Food ($500.00, 55.6% of expenses)"));
    }

    #[test]
    fn test_format_spending_report() {
        let mut ledger = ledger();
        ledger.set_budget_limit("Food", dec(450)).unwrap();
        let month = MonthKey::new(2024, 1).unwrap();
        let filter = MonthMatch::Calendar.filter_for(month);
        let output = format_spending_report(&build_spending_report(&ledger, month, &filter));

        assert!(output.contains("Expense percentage: 90.0%"));
        assert!(output.contains("Status: CRITICAL"));
        assert!(output.contains("Budget status for 2024-01:"));
        assert!(output.contains("OVER BUDGET"));
        assert!(output.contains("Budget exceeded in at least one category"));
        assert!(output.contains("Save $100.00 more to reach the goal"));
    }

    #[test]
    fn test_format_config() {
        assert_eq!(
            format_config(&Config::default()),
            "month_match = calendar\ntransactions_file = financial_data.csv\nbudget_file = budget_limits.csv\n"
        );
    }
}
