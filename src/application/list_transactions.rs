//! List transactions use case

use crate::domain::{MonthKey, Transaction, TransactionKind};
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, LedgerRepository};

/// List transactions in entry order, optionally by month and kind.
pub fn list_transactions(
    repository: &FileSystemRepository,
    month: Option<MonthKey>,
    kind: Option<TransactionKind>,
) -> Result<Vec<Transaction>> {
    let config = repository.load_config()?;
    let ledger = repository.load_ledger(&config)?;
    let filter = month.map(|key| config.get_month_match().filter_for(key));

    Ok(ledger
        .transactions()
        .iter()
        .filter(|t| kind.map_or(true, |k| t.kind == k))
        .filter(|t| filter.as_ref().map_or(true, |f| f.matches(&t.date)))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::Config;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn seeded() -> (TempDir, FileSystemRepository) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        let config = Config::default();
        repo.save_config(&config).unwrap();

        let mut ledger = repo.load_ledger(&config).unwrap();
        for (date, amount, kind) in [
            ("2024-01-01", 1000, TransactionKind::Income),
            ("2024-01-05", 40, TransactionKind::Expense),
            ("Mon Feb 12 09:30:00 2024", 25, TransactionKind::Expense),
        ] {
            ledger
                .add_transaction(date, "entry", Decimal::from(amount), "Misc", kind)
                .unwrap();
        }
        repo.save_ledger(&config, &ledger).unwrap();
        (temp, repo)
    }

    #[test]
    fn test_list_all() {
        let (_temp, repo) = seeded();
        assert_eq!(list_transactions(&repo, None, None).unwrap().len(), 3);
    }

    #[test]
    fn test_list_by_month_and_kind() {
        let (_temp, repo) = seeded();
        let feb = MonthKey::new(2024, 2);

        let in_feb = list_transactions(&repo, feb, None).unwrap();
        assert_eq!(in_feb.len(), 1);
        assert_eq!(in_feb[0].amount, Decimal::from(25));

        let jan = MonthKey::new(2024, 1);
        let jan_expenses =
            list_transactions(&repo, jan, Some(TransactionKind::Expense)).unwrap();
        assert_eq!(jan_expenses.len(), 1);
        assert_eq!(jan_expenses[0].amount, Decimal::from(40));
    }
}
