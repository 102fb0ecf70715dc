//! Configuration management

use crate::domain::MonthMatch;
use crate::error::{Result, SpendwiseError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Name of the hidden directory that marks a ledger root
pub const LEDGER_DIR: &str = ".spendwise";

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_TRANSACTIONS_FILE: &str = "financial_data.csv";
const DEFAULT_BUDGET_FILE: &str = "budget_limits.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub month_match: MonthMatch,
    pub transactions_file: String,
    pub budget_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            month_match: MonthMatch::default(),
            transactions_file: DEFAULT_TRANSACTIONS_FILE.to_string(),
            budget_file: DEFAULT_BUDGET_FILE.to_string(),
        }
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new(month_match: MonthMatch) -> Self {
        Config {
            month_match,
            ..Config::default()
        }
    }

    /// Load config from .spendwise/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(LEDGER_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpendwiseError::NotLedgerDirectory(path.to_path_buf())
            } else {
                SpendwiseError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| SpendwiseError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .spendwise/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let ledger_dir = path.join(LEDGER_DIR);
        let config_path = ledger_dir.join(CONFIG_FILE);

        if !ledger_dir.exists() {
            fs::create_dir(&ledger_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| SpendwiseError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Month matching mode, honoring a SPENDWISE_MONTH_MATCH override
    pub fn get_month_match(&self) -> MonthMatch {
        std::env::var("SPENDWISE_MONTH_MATCH")
            .ok()
            .and_then(|value| match MonthMatch::from_str(&value) {
                Ok(mode) => Some(mode),
                Err(e) => {
                    tracing::warn!("ignoring SPENDWISE_MONTH_MATCH: {}", e);
                    None
                }
            })
            .unwrap_or(self.month_match)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config() {
        let config = Config::new(MonthMatch::Substring);
        assert_eq!(config.month_match, MonthMatch::Substring);
        assert_eq!(config.transactions_file, "financial_data.csv");
        assert_eq!(config.budget_file, "budget_limits.csv");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new(MonthMatch::Substring);
        config.budget_file = "limits.csv".to_string();

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".spendwise").exists());
        assert!(temp.path().join(".spendwise/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        assert!(result.is_err());
        match result.unwrap_err() {
            SpendwiseError::NotLedgerDirectory(_) => {}
            _ => panic!("Expected NotLedgerDirectory error"),
        }
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".spendwise")).unwrap();
        fs::write(
            temp.path().join(".spendwise/config.toml"),
            "month_match = \"substring\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.month_match, MonthMatch::Substring);
        assert_eq!(loaded.transactions_file, "financial_data.csv");
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".spendwise")).unwrap();
        fs::write(
            temp.path().join(".spendwise/config.toml"),
            "month_match = \"fuzzy\"\n",
        )
        .unwrap();

        match Config::load_from_dir(temp.path()) {
            Err(SpendwiseError::Config(msg)) => assert!(msg.contains("config.toml")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
