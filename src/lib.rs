//! Budget Vault - a daily allowance released from a time-boxed fund
//!
//! Money moves from a main account into a vault for a fixed number of days.
//! Each day a fixed share can be released; missed days are caught up on the
//! next release, and whatever is not taken carries over. Once every day has
//! been released the leftovers can be returned to the main account.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Money, percentages, and the vault record
//! - `storage`: JSON file storage layer
//! - `services`: The budget cycle engine and the service running it
//! - `display`: Terminal formatting
//! - `export`: JSON and YAML snapshots
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use budget_vault::services::VaultService;
//! use budget_vault::storage::MemoryStateStore;
//!
//! let service = VaultService::new(MemoryStateStore::default());
//! let response = service.transfer(1000.0, 5);
//! assert!(response.is_success());
//! assert_eq!(service.get_balance().remaining_days, 5);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{VaultError, VaultResult};
