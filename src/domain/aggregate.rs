//! Category sums, percentages and rankings

use crate::domain::alert::{classify_share, ShareLevel};
use crate::domain::month::MonthFilter;
use crate::domain::transaction::{Transaction, TransactionKind};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A category paired with a summed amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAggregate {
    pub category: String,
    pub amount: Decimal,
}

/// A ranked category with its share of the overall total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
    pub level: ShareLevel,
}

/// Sum amounts per category for one kind, optionally restricted to a month.
///
/// Categories without a matching transaction do not appear in the result.
pub fn category_totals(
    transactions: &[Transaction],
    kind: TransactionKind,
    month_filter: Option<&MonthFilter>,
) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();

    for transaction in transactions {
        if transaction.kind != kind {
            continue;
        }
        if let Some(filter) = month_filter {
            if !filter.matches(&transaction.date) {
                continue;
            }
        }
        let sum = totals.entry(transaction.category.clone()).or_default();
        *sum = sum.saturating_add(transaction.amount);
    }

    totals
}

/// `amount` as a percentage of `total`; 0 when the total is 0.
///
/// Ratios too large to represent saturate at `Decimal::MAX`.
pub fn percentage_of_total(amount: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    amount
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// Sum of amounts, saturating at `Decimal::MAX`
pub fn saturating_sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// Order categories by amount, largest first, ties by name ascending
pub fn rank_by_amount_descending(totals: &BTreeMap<String, Decimal>) -> Vec<CategoryAggregate> {
    let mut ranked: Vec<CategoryAggregate> = totals
        .iter()
        .map(|(category, amount)| CategoryAggregate {
            category: category.clone(),
            amount: *amount,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    ranked
}

/// The largest category of a ranking, if any
pub fn top_category(ranked: &[CategoryAggregate]) -> Option<&CategoryAggregate> {
    ranked.first()
}

/// Attach percentage-of-total and share level to each ranked category
pub fn category_shares(ranked: &[CategoryAggregate], total: Decimal) -> Vec<CategoryShare> {
    ranked
        .iter()
        .map(|aggregate| {
            let percentage = percentage_of_total(aggregate.amount, total);
            CategoryShare {
                category: aggregate.category.clone(),
                amount: aggregate.amount,
                percentage,
                level: classify_share(percentage),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::month::{MonthKey, MonthMatch};

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn tx(date: &str, amount: i64, category: &str, kind: TransactionKind) -> Transaction {
        Transaction {
            date: date.to_string(),
            description: String::new(),
            amount: dec(amount),
            category: category.to_string(),
            kind,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("2024-01-01", 1000, "Job", TransactionKind::Income),
            tx("2024-01-05", 300, "Food", TransactionKind::Expense),
            tx("2024-02-03", 200, "Food", TransactionKind::Expense),
            tx("2024-01-20", 400, "Rent", TransactionKind::Expense),
        ]
    }

    #[test]
    fn test_category_totals_by_kind() {
        let totals = category_totals(&sample(), TransactionKind::Expense, None);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["Food"], dec(500));
        assert_eq!(totals["Rent"], dec(400));
        assert!(!totals.contains_key("Job"));
    }

    #[test]
    fn test_category_totals_month_filter() {
        let filter = MonthMatch::Calendar.filter_for(MonthKey::new(2024, 2).unwrap());
        let totals = category_totals(&sample(), TransactionKind::Expense, Some(&filter));
        assert_eq!(totals.len(), 1);
        assert_eq!(totals["Food"], dec(200));
        assert!(!totals.contains_key("Rent"));
    }

    #[test]
    fn test_category_totals_substring_filter() {
        let filter = MonthFilter::Substring("2024-01".to_string());
        let totals = category_totals(&sample(), TransactionKind::Expense, Some(&filter));
        assert_eq!(totals["Food"], dec(300));
        assert_eq!(totals["Rent"], dec(400));
    }

    #[test]
    fn test_category_totals_empty() {
        assert!(category_totals(&[], TransactionKind::Income, None).is_empty());
    }

    #[test]
    fn test_percentage_of_total() {
        assert_eq!(percentage_of_total(dec(25), dec(200)), Decimal::new(125, 1));
        assert_eq!(percentage_of_total(dec(42), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage_of_total(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_percentage_of_total_saturates() {
        let huge = Decimal::from_i128_with_scale(10_000_000_000_000_000_000_000_000_000, 0);
        let cent = Decimal::new(1, 2);
        assert_eq!(percentage_of_total(huge, cent), Decimal::MAX);
        assert_eq!(percentage_of_total(Decimal::MAX, Decimal::ONE), Decimal::MAX);
    }

    #[test]
    fn test_category_totals_saturate() {
        let mut big = tx("2024-01-01", 0, "Big", TransactionKind::Expense);
        big.amount = Decimal::MAX;
        let transactions = vec![big.clone(), big];

        let totals = category_totals(&transactions, TransactionKind::Expense, None);
        assert_eq!(totals["Big"], Decimal::MAX);
        assert_eq!(saturating_sum(vec![Decimal::MAX, dec(1)]), Decimal::MAX);
        assert_eq!(saturating_sum(vec![dec(2), dec(3)]), dec(5));
    }

    #[test]
    fn test_rank_ties_broken_alphabetically() {
        let mut totals = BTreeMap::new();
        totals.insert("C".to_string(), dec(10));
        totals.insert("B".to_string(), dec(50));
        totals.insert("A".to_string(), dec(50));

        let ranked = rank_by_amount_descending(&totals);
        let pairs: Vec<(&str, Decimal)> = ranked
            .iter()
            .map(|c| (c.category.as_str(), c.amount))
            .collect();
        assert_eq!(pairs, vec![("A", dec(50)), ("B", dec(50)), ("C", dec(10))]);
    }

    #[test]
    fn test_top_category() {
        let totals = category_totals(&sample(), TransactionKind::Expense, None);
        let ranked = rank_by_amount_descending(&totals);
        let top = top_category(&ranked).unwrap();
        assert_eq!(top.category, "Food");
        assert_eq!(top.amount, dec(500));
        assert!(top_category(&[]).is_none());
    }

    #[test]
    fn test_category_shares() {
        let totals = category_totals(&sample(), TransactionKind::Expense, None);
        let ranked = rank_by_amount_descending(&totals);
        let shares = category_shares(&ranked, dec(900));

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, "Food");
        assert_eq!(shares[0].level, ShareLevel::High);
        assert!(shares[1].percentage > dec(44) && shares[1].percentage < dec(45));
    }
}
