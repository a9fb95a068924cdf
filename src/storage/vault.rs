//! Vault record persistence
//!
//! The vault is a single JSON record. Loading never fails: a missing,
//! unreadable or malformed file yields the default record, and a record
//! written by an older version has its missing fields filled in from the
//! defaults before it is decoded.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{VaultError, VaultResult};
use crate::models::VaultState;

use super::file_io::{read_json_value, write_json_atomic};

/// Load and persist the vault record
pub trait StateStore {
    /// Current record, or the defaults if nothing usable is stored
    fn load(&self) -> VaultState;

    /// Replace the stored record
    fn save(&self, state: &VaultState) -> VaultResult<()>;
}

/// Fill fields missing from a stored record with the defaults, then decode it
///
/// Fields present in the record are kept as they are, even when they differ
/// from the defaults. Non-object input and wrongly typed fields are errors.
pub fn backfill(stored: Value, defaults: &VaultState) -> Result<VaultState, serde_json::Error> {
    let mut record = match stored {
        Value::Object(map) => map,
        other => {
            return Err(serde::de::Error::custom(format!(
                "expected a JSON object, found {}",
                other
            )))
        }
    };

    if let Value::Object(default_fields) = serde_json::to_value(defaults)? {
        for (key, value) in default_fields {
            record.entry(key).or_insert(value);
        }
    }

    serde_json::from_value(Value::Object(record))
}

/// Repository for the vault record backed by a JSON file
pub struct JsonStateStore {
    path: PathBuf,
    defaults: VaultState,
}

impl JsonStateStore {
    /// Create a store at `path`, falling back to `defaults`
    pub fn new(path: PathBuf, defaults: VaultState) -> Self {
        Self { path, defaults }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a record has been written yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn try_load(&self) -> VaultResult<Option<VaultState>> {
        let Some(value) = read_json_value(&self.path)? else {
            return Ok(None);
        };

        let state = backfill(value, &self.defaults).map_err(|e| {
            VaultError::Storage(format!("Malformed vault record {}: {}", self.path.display(), e))
        })?;

        if let Err(e) = state.validate() {
            warn!(path = %self.path.display(), error = %e, "vault record breaks an invariant");
        }

        Ok(Some(state))
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> VaultState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!(path = %self.path.display(), "no vault record yet, using defaults");
                self.defaults.clone()
            }
            Err(e) => {
                warn!(error = %e, "unreadable vault record, using defaults");
                self.defaults.clone()
            }
        }
    }

    fn save(&self, state: &VaultState) -> VaultResult<()> {
        write_json_atomic(&self.path, state)
    }
}

/// In-memory store for tests and embedding
#[derive(Default)]
pub struct MemoryStateStore {
    state: RwLock<VaultState>,
}

impl MemoryStateStore {
    pub fn new(state: VaultState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> VaultState {
        self.state
            .read()
            .map(|s| s.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    fn save(&self, state: &VaultState) -> VaultResult<()> {
        let mut data = self.state.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *data = state.clone();
        Ok(())
    }
}
