//! YAML export of the vault record
//!
//! Same envelope as the JSON export, with a comment header for humans.

use std::io::Write;

use crate::error::{VaultError, VaultResult};
use crate::export::json::VaultExport;
use crate::models::VaultState;

/// Export the record to YAML
pub fn export_state_yaml<W: Write>(state: &VaultState, writer: &mut W) -> VaultResult<()> {
    let export = VaultExport::new(state.clone());
    let io_err = |e: std::io::Error| VaultError::Export(e.to_string());

    writeln!(writer, "# Budget Vault Export").map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| VaultError::Export(e.to_string()))?;

    Ok(())
}
