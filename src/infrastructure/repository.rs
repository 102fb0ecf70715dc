//! File system repository

use crate::domain::{Ledger, LoadReport, TransactionRecord};
use crate::error::{Result, SpendwiseError};
use crate::infrastructure::config::LEDGER_DIR;
use crate::infrastructure::records::{self, FieldCleanup};
use crate::infrastructure::Config;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Abstract repository for ledger persistence
pub trait LedgerRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .spendwise/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .spendwise/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .spendwise directory exists
    fn is_initialized(&self) -> bool;

    /// Create .spendwise directory structure
    fn initialize(&self) -> Result<()>;

    /// Hydrate a ledger from the transaction and budget files.
    /// Missing files mean an empty ledger.
    fn load_ledger(&self, config: &Config) -> Result<Ledger>;

    /// Like `load_ledger`, but fails with `MalformedRecord` when any row had
    /// to be skipped. Saving such a ledger would drop those rows from disk.
    fn load_ledger_for_update(&self, config: &Config) -> Result<Ledger>;

    /// Persist the whole ledger, replacing the previous files
    fn save_ledger(&self, config: &Config, ledger: &Ledger) -> Result<()>;
}

/// File system implementation of LedgerRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover ledger root by walking up from current directory
    /// First checks SPENDWISE_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("SPENDWISE_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_ledger_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(SpendwiseError::Config(format!(
                    "SPENDWISE_ROOT is set to '{}' but no .spendwise directory found. \
                    Run 'spendwise init' in that directory or unset SPENDWISE_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover ledger root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_ledger_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(SpendwiseError::NotLedgerDirectory(start.to_path_buf()));
                }
            }
        }
    }

    fn has_ledger_dir(path: &Path) -> bool {
        path.join(LEDGER_DIR).is_dir()
    }

    /// Read a file relative to the root; `None` when it does not exist
    fn read_optional(&self, filename: &str) -> Result<Option<String>> {
        let path = self.root.join(filename);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SpendwiseError::FileUnavailable { path, source }),
        }
    }

    /// Replace a file by writing a temp sibling and renaming it into place.
    ///
    /// A crash before the rename leaves the previous file intact plus a stray
    /// `.spendwise-tmp-<pid>` file; on Windows the destination is removed
    /// first, so a crash between remove and rename loses the old file.
    pub fn write_atomic(&self, filename: &str, content: &str) -> Result<()> {
        let path = self.root.join(filename);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.spendwise-tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("records.csv"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, content).map_err(|source| SpendwiseError::FileUnavailable {
            path: path.clone(),
            source,
        })?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Load both record files, returning the per-file reports
    /// (transactions, then budget limits)
    fn load_with_reports(&self, config: &Config) -> Result<(Ledger, [LoadReport; 2])> {
        let mut ledger = Ledger::new();

        let transactions = match self.read_optional(&config.transactions_file)? {
            Some(content) => {
                let rows = records::decode_transactions(&content, FieldCleanup::None)?;
                ledger.bulk_load(rows)
            }
            None => {
                tracing::info!(
                    file = %config.transactions_file,
                    "no transactions file, starting empty"
                );
                LoadReport::default()
            }
        };

        let budgets = match self.read_optional(&config.budget_file)? {
            Some(content) => {
                let rows = records::decode_budget_limits(&content)?;
                ledger.bulk_load_budget_limits(rows)
            }
            None => LoadReport::default(),
        };

        let combined = transactions.merge(budgets);
        if combined.skipped() > 0 {
            tracing::warn!(
                skipped = combined.skipped(),
                transactions_skipped = transactions.skipped(),
                budgets_skipped = budgets.skipped(),
                "skipped malformed rows while loading ledger"
            );
        }
        tracing::info!(
            transactions = transactions.succeeded,
            budget_limits = budgets.succeeded,
            "loaded ledger"
        );

        Ok((ledger, [transactions, budgets]))
    }

    /// Read transaction rows from an arbitrary user-supplied file.
    ///
    /// Literal quote characters are stripped from the text fields.
    pub fn read_import_file(path: &Path) -> Result<Vec<TransactionRecord>> {
        let content =
            fs::read_to_string(path).map_err(|source| SpendwiseError::FileUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        records::decode_transactions(&content, FieldCleanup::StripQuotes)
    }

    /// Write an export to an arbitrary user-supplied path
    pub fn write_export_file(path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|source| SpendwiseError::FileUnavailable {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl LedgerRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_ledger_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let ledger_dir = self.root.join(LEDGER_DIR);

        if ledger_dir.exists() {
            return Err(SpendwiseError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&ledger_dir)?;
        Ok(())
    }

    fn load_ledger(&self, config: &Config) -> Result<Ledger> {
        let (ledger, _) = self.load_with_reports(config)?;
        Ok(ledger)
    }

    fn load_ledger_for_update(&self, config: &Config) -> Result<Ledger> {
        let (ledger, reports) = self.load_with_reports(config)?;

        let files = [&config.transactions_file, &config.budget_file];
        for (file, report) in files.into_iter().zip(reports) {
            if report.skipped() > 0 {
                return Err(SpendwiseError::MalformedRecord {
                    line: report.first_skipped_line.unwrap_or(0),
                    reason: format!(
                        "{} of {} rows in '{}' could not be loaded; fix or remove them \
                         before changing the ledger",
                        report.skipped(),
                        report.attempted,
                        file
                    ),
                });
            }
        }

        Ok(ledger)
    }

    fn save_ledger(&self, config: &Config, ledger: &Ledger) -> Result<()> {
        let content = records::encode_transactions(ledger.transactions())?;
        self.write_atomic(&config.transactions_file, &content)?;

        // An empty limit set leaves any existing budget file alone.
        if ledger.has_budget_limits() {
            let content = records::encode_budget_limits(ledger.budget_limits())?;
            self.write_atomic(&config.budget_file, &content)?;
        }

        tracing::info!(transactions = ledger.len(), "saved ledger");
        Ok(())
    }
}
