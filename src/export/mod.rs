//! Export module for the budget vault
//!
//! - JSON: machine-readable snapshot of the vault record
//! - YAML: human-readable snapshot of the vault record

pub mod json;
pub mod yaml;

pub use json::{export_state_json, VaultExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_state_yaml;
