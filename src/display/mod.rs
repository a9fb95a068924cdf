//! Display formatting for terminal output

pub mod vault;

pub use vault::{format_release_details, format_vault_state};
