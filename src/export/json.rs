//! JSON export of the vault record
//!
//! Wraps the record in an envelope carrying a schema version, timestamp, and
//! the derived cycle phase.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{VaultError, VaultResult};
use crate::models::{CyclePhase, VaultState};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Vault export structure
#[derive(Debug, Clone, Serialize)]
pub struct VaultExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Cycle phase at export time
    pub phase: CyclePhase,

    /// The vault record
    pub state: VaultState,
}

impl VaultExport {
    /// Snapshot a record for export
    pub fn new(state: VaultState) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            phase: state.phase(),
            state,
        }
    }
}

/// Export the record to JSON
pub fn export_state_json<W: Write>(
    state: &VaultState,
    writer: &mut W,
    pretty: bool,
) -> VaultResult<()> {
    let export = VaultExport::new(state.clone());

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| VaultError::Export(e.to_string()))?;

    Ok(())
}
