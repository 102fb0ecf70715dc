//! Config management use case

use crate::domain::MonthMatch;
use crate::error::{Result, SpendwiseError};
use crate::infrastructure::{Config, FileSystemRepository, LedgerRepository};
use std::str::FromStr;

const VALID_KEYS: &str = "month_match, transactions_file, budget_file";

/// Service for managing ledger configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "month_match" => Ok(config.month_match.to_string()),
            "transactions_file" => Ok(config.transactions_file),
            "budget_file" => Ok(config.budget_file),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "month_match" => {
                config.month_match = MonthMatch::from_str(value).map_err(SpendwiseError::Config)?;
            }
            "transactions_file" => config.transactions_file = file_name(key, value)?,
            "budget_file" => config.budget_file = file_name(key, value)?,
            _ => return Err(unknown_key(key)),
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn unknown_key(key: &str) -> SpendwiseError {
    SpendwiseError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, VALID_KEYS
    ))
}

fn file_name(key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SpendwiseError::Config(format!("{} cannot be empty", key)));
    }
    Ok(value.to_string())
}
