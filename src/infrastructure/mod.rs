//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod records;
pub mod repository;

pub use config::Config;
pub use repository::{FileSystemRepository, LedgerRepository};
