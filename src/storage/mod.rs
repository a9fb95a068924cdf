//! Storage layer for the budget vault
//!
//! Provides JSON file storage with atomic writes, default-filling of missing
//! or damaged records, and automatic directory creation.

pub mod file_io;
pub mod vault;

pub use file_io::{json_file_valid, read_json_value, write_json_atomic};
pub use vault::{backfill, JsonStateStore, MemoryStateStore, StateStore};

use crate::config::paths::VaultPaths;
use crate::config::settings::Settings;
use crate::error::VaultError;
use crate::models::VaultState;

/// Main storage coordinator
pub struct Storage {
    paths: VaultPaths,
    pub vault: JsonStateStore,
}

impl Storage {
    /// Create a new Storage instance
    ///
    /// A fresh record starts with the configured starting balance.
    pub fn new(paths: VaultPaths, settings: &Settings) -> Result<Self, VaultError> {
        paths.ensure_directories()?;

        let defaults = VaultState::with_main_account(settings.starting_balance);

        Ok(Self {
            vault: JsonStateStore::new(paths.vault_file(), defaults),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }
}
