// Copyright 2025 Myra Codec Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for report generation.

use crate::document::Region;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a report update.
///
/// None of these are recoverable locally: when one is returned the document
/// must not be written.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The results text produced zero benchmark rows.
    #[error("No benchmark rows found in {source_name}")]
    NoData {
        /// Name of the input (usually a file path).
        source_name: String,
    },

    /// A row matched the row pattern but a numeric field did not parse.
    #[error("Malformed benchmark row at line {line}: invalid {field} `{value}`")]
    MalformedRow {
        /// 1-based line number in the results text.
        line: usize,
        /// Which field failed (`score` or `error`).
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// The document lacks the start/end marker pair for a region.
    #[error("Markers for {region} not found in document")]
    MissingMarker {
        /// Region that was looked up.
        region: Region,
    },

    /// The marker pair exists but is duplicated or out of order.
    #[error("Markers for {region} are malformed: {reason}")]
    MalformedMarkers {
        /// Region that was looked up.
        region: Region,
        /// What is wrong with the markers.
        reason: &'static str,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON export failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Loading layered configuration failed.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
