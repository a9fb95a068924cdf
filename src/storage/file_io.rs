//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::VaultError;

/// Read a file as untyped JSON, returning `None` if the file doesn't exist
pub fn read_json_value<P: AsRef<Path>>(path: P) -> Result<Option<Value>, VaultError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| VaultError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| VaultError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Replace `path` with the pretty-printed JSON of `data`
///
/// The record is staged in a sibling `.json.tmp` file and renamed over the
/// target, so readers see either the previous record or the new one. The
/// staging file is removed if any step fails.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), VaultError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| storage_err("Failed to create directory for", path, e))?;
    }

    let staging = path.with_extension("json.tmp");
    let result = stage(&staging, data)
        .map_err(|e| storage_err("Failed to stage", path, e))
        .and_then(|()| {
            fs::rename(&staging, path).map_err(|e| storage_err("Failed to replace", path, e))
        });

    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn storage_err(what: &str, path: &Path, e: impl fmt::Display) -> VaultError {
    VaultError::Storage(format!("{} {}: {}", what, path.display(), e))
}

fn stage<T: Serialize>(staging: &Path, data: &T) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(staging)?);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

/// Check if a JSON file exists and is valid
pub fn json_file_valid<P: AsRef<Path>>(path: P) -> bool {
    matches!(read_json_value(path), Ok(Some(_)))
}
