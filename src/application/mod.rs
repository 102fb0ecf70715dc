//! Application layer - Use cases and orchestration

pub mod add_transaction;
pub mod analysis;
pub mod budget;
pub mod init;
pub mod list_transactions;
pub mod manage_config;
pub mod transfer;

pub use add_transaction::{AddOutcome, AddTransactionService, NewTransaction};
pub use analysis::{AnalysisService, CategoryBudgetStatus, CategoryReport, SpendingReport};
pub use budget::{BudgetChange, BudgetService};
pub use init::InitService;
pub use list_transactions::list_transactions;
pub use manage_config::ConfigService;
pub use transfer::{ExportOutcome, ImportOutcome, TransferService};
