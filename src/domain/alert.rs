//! Spending tiers, budget tiers and the savings target
//!
//! Every classifier walks a table of `(threshold, tier)` pairs from the highest
//! threshold down and returns the first tier whose threshold the input reaches.
//! Inputs below every threshold get the table's fallback tier.

use crate::domain::aggregate::percentage_of_total;
use rust_decimal::Decimal;
use std::fmt;

/// Overall spending severity, driven by expenses as a percentage of income
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpendingTier {
    Good,
    Alert,
    Warning,
    Critical,
}

/// Per-category severity, driven by spend as a percentage of the limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BudgetTier {
    Good,
    Alert,
    Warning,
    OverBudget,
}

/// How dominant a category is within its kind's total
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShareLevel {
    Low,
    Medium,
    High,
}

const OVERALL_TIERS: &[(u32, SpendingTier)] = &[
    (90, SpendingTier::Critical),
    (80, SpendingTier::Warning),
    (70, SpendingTier::Alert),
];

const CATEGORY_TIERS: &[(u32, BudgetTier)] = &[
    (100, BudgetTier::OverBudget),
    (80, BudgetTier::Warning),
    (60, BudgetTier::Alert),
];

const SHARE_LEVELS: &[(u32, ShareLevel)] = &[(30, ShareLevel::High), (15, ShareLevel::Medium)];

/// Share of income, in percent, that should be left over
pub const SAVINGS_TARGET_PERCENT: u32 = 20;

fn classify<T: Copy>(percentage: Decimal, table: &[(u32, T)], fallback: T) -> T {
    table
        .iter()
        .find(|(threshold, _)| percentage >= Decimal::from(*threshold))
        .map(|(_, tier)| *tier)
        .unwrap_or(fallback)
}

/// Classify expenses as a percentage of income
pub fn classify_overall(percentage: Decimal) -> SpendingTier {
    classify(percentage, OVERALL_TIERS, SpendingTier::Good)
}

/// Classify a category's spend against its monthly limit.
///
/// A zero limit yields a 0% ratio and therefore `Good`; the ledger never
/// stores such a limit.
pub fn classify_category(spent: Decimal, limit: Decimal) -> BudgetTier {
    classify(
        percentage_of_total(spent, limit),
        CATEGORY_TIERS,
        BudgetTier::Good,
    )
}

/// Classify a category's share of a total
pub fn classify_share(percentage: Decimal) -> ShareLevel {
    classify(percentage, SHARE_LEVELS, ShareLevel::Low)
}

/// Amount still missing to reach the savings target; 0 when it is met
pub fn savings_gap(total_income: Decimal, total_expenses: Decimal) -> Decimal {
    savings_analysis(total_income, total_expenses).gap
}

/// Savings target versus actual savings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsAnalysis {
    pub target: Decimal,
    pub actual: Decimal,
    pub gap: Decimal,
}

impl SavingsAnalysis {
    pub fn goal_met(&self) -> bool {
        self.gap.is_zero()
    }
}

pub fn savings_analysis(total_income: Decimal, total_expenses: Decimal) -> SavingsAnalysis {
    let percent = Decimal::from(SAVINGS_TARGET_PERCENT);
    let target = total_income
        .checked_mul(percent)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| total_income / Decimal::ONE_HUNDRED * percent);
    let actual = total_income.saturating_sub(total_expenses);
    let gap = target.saturating_sub(actual).max(Decimal::ZERO);
    SavingsAnalysis {
        target,
        actual,
        gap,
    }
}

impl fmt::Display for SpendingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SpendingTier::Good => "GOOD",
            SpendingTier::Alert => "ALERT",
            SpendingTier::Warning => "WARNING",
            SpendingTier::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetTier::Good => "GOOD",
            BudgetTier::Alert => "ALERT",
            BudgetTier::Warning => "WARNING",
            BudgetTier::OverBudget => "OVER BUDGET",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(value: i64, scale: u32) -> Decimal {
        Decimal::new(value, scale)
    }

    #[test]
    fn test_classify_overall_boundaries() {
        assert_eq!(classify_overall(pct(89999, 3)), SpendingTier::Warning);
        assert_eq!(classify_overall(pct(900, 1)), SpendingTier::Critical);
        assert_eq!(classify_overall(pct(150, 0)), SpendingTier::Critical);
        assert_eq!(classify_overall(pct(80, 0)), SpendingTier::Warning);
        assert_eq!(classify_overall(pct(79999, 3)), SpendingTier::Alert);
        assert_eq!(classify_overall(pct(700, 1)), SpendingTier::Alert);
        assert_eq!(classify_overall(pct(69999, 3)), SpendingTier::Good);
        assert_eq!(classify_overall(Decimal::ZERO), SpendingTier::Good);
    }

    #[test]
    fn test_classify_category_boundaries() {
        let limit = Decimal::from(100);
        assert_eq!(classify_category(pct(99999, 3), limit), BudgetTier::Warning);
        assert_eq!(classify_category(pct(1000, 1), limit), BudgetTier::OverBudget);
        assert_eq!(classify_category(pct(250, 0), limit), BudgetTier::OverBudget);
        assert_eq!(classify_category(pct(80, 0), limit), BudgetTier::Warning);
        assert_eq!(classify_category(pct(79999, 3), limit), BudgetTier::Alert);
        assert_eq!(classify_category(pct(60, 0), limit), BudgetTier::Alert);
        assert_eq!(classify_category(pct(59999, 3), limit), BudgetTier::Good);
        assert_eq!(classify_category(Decimal::ZERO, limit), BudgetTier::Good);
    }

    #[test]
    fn test_classify_category_uses_ratio() {
        assert_eq!(
            classify_category(Decimal::from(240), Decimal::from(300)),
            BudgetTier::Warning
        );
        assert_eq!(
            classify_category(Decimal::from(10), Decimal::ZERO),
            BudgetTier::Good
        );
    }

    #[test]
    fn test_classify_share() {
        assert_eq!(classify_share(pct(30, 0)), ShareLevel::High);
        assert_eq!(classify_share(pct(2999, 2)), ShareLevel::Medium);
        assert_eq!(classify_share(pct(15, 0)), ShareLevel::Medium);
        assert_eq!(classify_share(pct(1499, 2)), ShareLevel::Low);
    }

    #[test]
    fn test_savings_gap() {
        let income = Decimal::from(1000);
        assert_eq!(savings_gap(income, Decimal::from(900)), Decimal::from(100));
        assert_eq!(savings_gap(income, Decimal::from(800)), Decimal::ZERO);
        assert_eq!(savings_gap(income, Decimal::from(500)), Decimal::ZERO);
        assert_eq!(savings_gap(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(
            savings_gap(Decimal::ZERO, Decimal::from(50)),
            Decimal::from(50)
        );
    }

    #[test]
    fn test_savings_analysis() {
        let analysis = savings_analysis(Decimal::from(2000), Decimal::from(1500));
        assert_eq!(analysis.target, Decimal::from(400));
        assert_eq!(analysis.actual, Decimal::from(500));
        assert!(analysis.goal_met());

        let short = savings_analysis(Decimal::from(2000), Decimal::from(1900));
        assert_eq!(short.gap, Decimal::from(300));
        assert!(!short.goal_met());
    }

    #[test]
    fn test_extreme_amounts_do_not_overflow() {
        let tiny = Decimal::new(1, 2);
        assert_eq!(classify_category(Decimal::MAX, tiny), BudgetTier::OverBudget);

        let savings = savings_analysis(Decimal::MAX, Decimal::ZERO);
        assert!(savings.goal_met());
        assert!(savings.target > Decimal::ZERO);

        let savings = savings_analysis(Decimal::ZERO, Decimal::MAX);
        assert_eq!(savings.actual, -Decimal::MAX);
        assert_eq!(savings.gap, Decimal::MAX);
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(SpendingTier::Critical.to_string(), "CRITICAL");
        assert_eq!(BudgetTier::OverBudget.to_string(), "OVER BUDGET");
    }
}
