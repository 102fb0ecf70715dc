//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spendwise")]
#[command(about = "Personal income, expense and budget ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new ledger
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// How dates are matched to months (calendar, substring)
        #[arg(short, long, default_value = "calendar")]
        month_match: String,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Record an income or expense
    Add {
        /// Transaction type (income, expense)
        #[arg(short, long)]
        kind: String,

        /// Positive amount, e.g. 12.50
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Category name (case-sensitive)
        #[arg(short, long)]
        category: String,

        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Date label (default: today as YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Manage monthly budget limits
    Budget {
        #[command(subcommand)]
        action: BudgetCommand,
    },

    /// Append transactions from a CSV file
    Import {
        /// File with a Date,Description,Amount,Category,Type header
        file: PathBuf,
    },

    /// Write all transactions with summary lines to a CSV file
    Export {
        /// Destination file
        file: PathBuf,
    },

    /// List transactions
    List {
        /// Month to show (YYYY-MM, current, last)
        #[arg(short, long)]
        month: Option<String>,

        /// Only show one type (income, expense)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Income and expenses broken down by category
    Summary {
        /// Month to analyze (YYYY-MM, current, last); default: all time
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Spending tier, budget alerts and savings analysis
    Alerts {
        /// Month for budget comparison (YYYY-MM, current, last)
        #[arg(short, long, default_value = "current")]
        month: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BudgetCommand {
    /// Create or replace the limit for a category
    Set {
        category: String,

        /// Positive monthly limit
        #[arg(allow_hyphen_values = true)]
        limit: String,
    },

    /// Show all limits
    List,
}
