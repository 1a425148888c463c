// Copyright 2025 Myra Codec Contributors
// SPDX-License-Identifier: Apache-2.0

//! File I/O for benchmark results and the report document.

use crate::error::{ReportError, Result};
use crate::result::BenchmarkRecord;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Read the raw JMH results text.
pub fn read_results(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| ReportError::io(path, e))
}

/// Read the current report document.
pub fn read_document(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| ReportError::io(path, e))
}

/// Replace the document in one step.
///
/// The text goes to a uniquely named temporary file in the same directory
/// which is then renamed over `path`, so readers see either the old report
/// or the new one. The temporary file is removed if anything fails.
pub fn write_document_atomic(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ReportError::io(dir, e))?;
    tmp.write_all(text.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| ReportError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| ReportError::io(path, e.error))?;

    debug!(path = %path.display(), bytes = text.len(), "Wrote document");
    Ok(())
}

/// Write parsed records as pretty-printed JSON.
pub fn write_records_json(records: &[BenchmarkRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }
    fs::write(path, json).map_err(|e| ReportError::io(path, e))
}

/// Read records previously written by [`write_records_json`].
pub fn read_records_json(path: impl AsRef<Path>) -> Result<Vec<BenchmarkRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}
