//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod vault;

pub use vault::{handle_vault_command, ExportFormat, VaultCommands};
