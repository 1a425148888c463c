// Copyright 2025 Myra Codec Contributors
// SPDX-License-Identifier: Apache-2.0

//! Run metadata and layered configuration.
//!
//! Values are resolved from, lowest precedence first:
//!
//! 1. built-in defaults,
//! 2. an optional TOML file,
//! 3. `MYRA_BENCH_*` environment variables.
//!
//! Command-line flags are applied on top by the CLI.
//!
//! # Example
//!
//! ```toml
//! host = "bench-01"
//! jvm = "OpenJDK 21.0.2"
//! forks = 3
//! doc_file = "benchmarks/docs/results.md"
//! ```

use crate::error::Result;
use chrono::{SecondsFormat, Utc};
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix for environment variable overrides (`MYRA_BENCH_HOST`, ...).
pub const ENV_PREFIX: &str = "MYRA_BENCH";

/// Config file looked up when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "myra-bench.toml";

/// Default JMH results location.
pub const DEFAULT_RESULTS_FILE: &str = "benchmarks/build/results/jmh/results.txt";

/// Default report location.
pub const DEFAULT_DOC_FILE: &str = "benchmarks/docs/results.md";

/// Display metadata for one benchmark run.
///
/// Every field is rendered verbatim; nothing here is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunMetadata {
    /// Run timestamp, usually `YYYY-MM-DDTHH:MM:SSZ`.
    pub timestamp: String,
    /// Command that produced the results.
    pub command: String,
    /// Host the benchmarks ran on.
    pub host: String,
    /// JVM identity.
    pub jvm: String,
    /// Warmup iterations.
    pub warmups: u32,
    /// Duration of one warmup iteration.
    pub warmup_time: String,
    /// Measurement iterations.
    pub measurements: u32,
    /// Duration of one measurement iteration.
    pub measurement_time: String,
    /// JMH forks.
    pub forks: u32,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl Default for RunMetadata {
    fn default() -> Self {
        Self {
            timestamp: String::new(),
            command: String::new(),
            host: "unknown-host".to_string(),
            jvm: "unknown JVM".to_string(),
            warmups: 5,
            warmup_time: "10s".to_string(),
            measurements: 5,
            measurement_time: "10s".to_string(),
            forks: 5,
            notes: None,
        }
    }
}

impl RunMetadata {
    /// Fill in the current UTC time if no timestamp was supplied.
    pub fn with_default_timestamp(mut self) -> Self {
        if self.timestamp.trim().is_empty() {
            self.timestamp = current_timestamp();
        }
        self
    }
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPaths {
    /// JMH text results.
    pub results_file: PathBuf,
    /// Markdown report to update.
    pub doc_file: PathBuf,
    /// Optional JSON export of the parsed records.
    pub json_out: Option<PathBuf>,
}

impl Default for ReportPaths {
    fn default() -> Self {
        Self {
            results_file: PathBuf::from(DEFAULT_RESULTS_FILE),
            doc_file: PathBuf::from(DEFAULT_DOC_FILE),
            json_out: None,
        }
    }
}

/// Fully resolved configuration before CLI overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportConfig {
    /// File locations.
    pub paths: ReportPaths,
    /// Run metadata.
    pub metadata: RunMetadata,
}

impl ReportConfig {
    /// Load configuration from `config_file` (if it exists) and the environment.
    ///
    /// A missing file is not an error; a file that fails to parse is.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_file, None)
    }

    /// Like [`ReportConfig::load`], reading variables from `env` instead of
    /// the process environment when given.
    pub(crate) fn load_with_env(
        config_file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self> {
        let file = config_file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        debug!(path = %file.display(), "Loading report configuration");

        let settings = Config::builder()
            .add_source(File::from(file).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?;

        Ok(Self {
            paths: settings.clone().try_deserialize()?,
            metadata: settings.try_deserialize()?,
        })
    }
}

/// Current UTC time at second precision with a `Z` suffix.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
