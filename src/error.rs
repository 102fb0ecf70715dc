//! Error types for spendwise

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for spendwise
#[derive(Debug, Error)]
pub enum SpendwiseError {
    #[error("Not a spendwise directory: {0}")]
    NotLedgerDirectory(PathBuf),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid transaction type: {0}")]
    InvalidKind(String),

    #[error("File unavailable: {}: {source}", path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Ledger totals out of sync: {0}")]
    TotalsMismatch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl SpendwiseError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SpendwiseError::NotLedgerDirectory(_) => 2,
            SpendwiseError::InvalidAmount(_) => 3,
            SpendwiseError::InvalidKind(_) => 4,
            SpendwiseError::FileUnavailable { .. } => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            SpendwiseError::NotLedgerDirectory(path) => {
                format!(
                    "Not a spendwise directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'spendwise init' in this directory to create a new ledger\n\
                    • Navigate to an existing spendwise directory\n\
                    • Set SPENDWISE_ROOT environment variable to your ledger path",
                    path.display()
                )
            }
            SpendwiseError::InvalidAmount(value) => {
                format!(
                    "Invalid amount: '{}'\n\n\
                    Amounts must be positive numbers, e.g. 12.50",
                    value
                )
            }
            SpendwiseError::InvalidKind(value) => {
                format!(
                    "Invalid transaction type: '{}'\n\n\
                    Valid types: income, expense\n\
                    Example: spendwise add --kind expense --amount 12.50 --category Food",
                    value
                )
            }
            SpendwiseError::FileUnavailable { path, source } => {
                format!(
                    "Could not access '{}': {}\n\n\
                    Suggestions:\n\
                    • Check the file name and that the file exists\n\
                    • Check that you have permission to read or write it",
                    path.display(),
                    source
                )
            }
            SpendwiseError::InvalidMonth(value) => {
                format!(
                    "Invalid month: '{}'\n\n\
                    Valid months:\n\
                    • YYYY-MM (e.g., 2025-01)\n\
                    • current, this\n\
                    • last, previous",
                    value
                )
            }
            SpendwiseError::Config(msg) => {
                if msg.contains("month_match") {
                    format!(
                        "{}\n\n\
                        Valid values: calendar, substring\n\
                        Example: spendwise config month_match substring",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using SpendwiseError
pub type Result<T> = std::result::Result<T, SpendwiseError>;
