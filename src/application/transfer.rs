//! Import and export use cases

use crate::domain::{LedgerTotals, LoadReport};
use crate::error::Result;
use crate::infrastructure::records;
use crate::infrastructure::{FileSystemRepository, LedgerRepository};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub report: LoadReport,
    pub totals: LedgerTotals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOutcome {
    pub transactions: usize,
    pub totals: LedgerTotals,
}

pub struct TransferService {
    repository: FileSystemRepository,
}

impl TransferService {
    pub fn new(repository: FileSystemRepository) -> Self {
        TransferService { repository }
    }

    /// Append every valid row of `path` to the ledger and save it.
    ///
    /// The ledger is saved even when every row was skipped.
    pub fn import(&self, path: &Path) -> Result<ImportOutcome> {
        let rows = FileSystemRepository::read_import_file(path)?;

        let config = self.repository.load_config()?;
        let mut ledger = self.repository.load_ledger_for_update(&config)?;
        let report = ledger.bulk_load(rows);
        self.repository.save_ledger(&config, &ledger)?;

        tracing::info!(
            file = %path.display(),
            attempted = report.attempted,
            added = report.succeeded,
            skipped = report.skipped(),
            "imported transactions"
        );

        Ok(ImportOutcome {
            report,
            totals: ledger.totals(),
        })
    }

    /// Write the ledger with summary comment lines to `path`
    pub fn export(&self, path: &Path, generated_on: &str) -> Result<ExportOutcome> {
        let config = self.repository.load_config()?;
        let ledger = self.repository.load_ledger(&config)?;

        let content = records::encode_export(&ledger, generated_on)?;
        FileSystemRepository::write_export_file(path, &content)?;

        Ok(ExportOutcome {
            transactions: ledger.len(),
            totals: ledger.totals(),
        })
    }
}
