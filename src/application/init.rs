//! Initialize ledger use case

use crate::domain::MonthMatch;
use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, LedgerRepository};
use std::fs;
use std::path::Path;

pub struct InitService;

impl InitService {
    /// Initialize a new ledger at the specified path.
    pub fn execute(path: &Path, month_match: MonthMatch) -> Result<Config> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let repo = FileSystemRepository::new(path.to_path_buf());
        repo.initialize()?;

        let config = Config::new(month_match);
        repo.save_config(&config)?;

        tracing::info!(root = %path.display(), %month_match, "initialized ledger");
        Ok(config)
    }
}
