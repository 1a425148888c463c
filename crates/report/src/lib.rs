// Copyright 2025 Myra Codec Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark results report generation for the Myra codec.
//!
//! This crate turns JMH text output into the three generated regions of the
//! benchmark results document: the latest run, the run history (newest
//! first) and a summary table comparing every codec against the fastest one
//! and against Myra.
//!
//! # Quick Start
//!
//! ```no_run
//! use myra_bench_report::{update_report, RunMetadata};
//!
//! let results = std::fs::read_to_string("results.txt").unwrap();
//! let document = std::fs::read_to_string("results.md").unwrap();
//! let meta = RunMetadata {
//!     command: "./gradlew :benchmarks:jmh".to_string(),
//!     ..RunMetadata::default()
//! }
//! .with_default_timestamp();
//!
//! let update = update_report(&results, "results.txt", &document, &meta).unwrap();
//! std::fs::write("results.md", update.document).unwrap();
//! ```
//!
//! # Modules
//!
//! - [`parse`] - JMH text parsing
//! - [`result`] - The `BenchmarkRecord` struct and naming rules
//! - [`summary`] - Grouping and percentage deltas
//! - [`markdown`] - Markdown rendering
//! - [`document`] - Marker-delimited region patching
//! - [`io`] - Reading inputs and writing the report
//! - [`config`] - Run metadata and layered configuration

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod markdown;
pub mod parse;
pub mod result;
pub mod summary;

pub use config::{ReportConfig, ReportPaths, RunMetadata};
pub use document::Region;
pub use error::{ReportError, Result};
pub use result::{BenchmarkRecord, Operation};

use std::path::Path;
use tracing::info;

/// Outcome of a successful report update.
#[derive(Debug, Clone)]
pub struct ReportUpdate {
    /// The full updated document.
    pub document: String,
    /// Records parsed from the results text.
    pub records: Vec<BenchmarkRecord>,
}

/// Merge a results file into the report document, in memory.
///
/// Replaces the latest-run and summary regions and prepends a historical
/// copy of the run to the history region. Either every region is updated or
/// an error is returned and the caller's document is untouched.
///
/// # Errors
///
/// - [`ReportError::NoData`] if the results contain no benchmark rows.
/// - [`ReportError::MalformedRow`] if a row has an unparseable number.
/// - [`ReportError::MissingMarker`] / [`ReportError::MalformedMarkers`] if the
///   document template is missing or has broken region markers.
pub fn update_report(
    results_text: &str,
    results_name: &str,
    document: &str,
    meta: &RunMetadata,
) -> Result<ReportUpdate> {
    let records = parse::parse_results(results_text, results_name)?;

    let latest_section = markdown::render_run_section(meta, &records, false);
    let history_section = markdown::render_run_section(meta, &records, true);
    let summary_table = markdown::render_summary(&records);

    let doc = document::replace_block(document, Region::LatestRun, &latest_section)?;

    let existing_history = document::extract_block_body(&doc, Region::RunHistory)?;
    let combined_history = document::prepend_history(&existing_history, &history_section);
    let doc = document::replace_block(&doc, Region::RunHistory, &combined_history)?;

    let doc = document::replace_block(&doc, Region::SummaryTable, &summary_table)?;

    Ok(ReportUpdate {
        document: doc,
        records,
    })
}

/// Everything needed to update a report on disk.
#[derive(Debug, Clone)]
pub struct UpdateRequest<'a> {
    /// File locations.
    pub paths: &'a ReportPaths,
    /// Run metadata, timestamp already resolved.
    pub metadata: &'a RunMetadata,
    /// Compute the update without writing the document.
    pub dry_run: bool,
}

/// Read the results and document, update the document and write it back.
///
/// The document is written once, after every region rendered successfully.
/// On any error nothing is written.
///
/// # Errors
///
/// Returns any error from [`update_report`], plus [`ReportError::Io`] and
/// [`ReportError::Json`] for file access and JSON export.
pub fn run_update(request: &UpdateRequest<'_>) -> Result<ReportUpdate> {
    let paths = request.paths;
    let results_text = io::read_results(&paths.results_file)?;
    let document = io::read_document(&paths.doc_file)?;

    let update = update_report(
        &results_text,
        &paths.results_file.display().to_string(),
        &document,
        request.metadata,
    )?;

    // The document write goes last so a failed export leaves it untouched.
    if let Some(json_out) = paths.json_out.as_deref() {
        io::write_records_json(&update.records, json_out)?;
    }
    if !request.dry_run {
        io::write_document_atomic(&paths.doc_file, &update.document)?;
    }

    info!(
        rows = update.records.len(),
        results = %paths.results_file.display(),
        doc = %paths.doc_file.display(),
        dry_run = request.dry_run,
        "Report updated"
    );
    Ok(update)
}

/// Parse a results file without touching any document.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<BenchmarkRecord>> {
    let path = path.as_ref();
    let text = io::read_results(path)?;
    parse::parse_results(&text, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = "\
Benchmark                              (datasetPath)  Mode  Cnt     Score    Error  Units
com.x.SbeOrderBookBenchmark.decode          datasetA thrpt    5  1000.0 ± 10.0  ops/s
com.x.MyraOrderBookBenchmark.decode         datasetA thrpt    5   800.0 ±  5.0  ops/s
";

    const TEMPLATE: &str = "\
# Results
<!-- LATEST_RUN_START -->
<!-- LATEST_RUN_END -->
<!-- SUMMARY_TABLE_START -->
<!-- SUMMARY_TABLE_END -->
<!-- RUN_HISTORY_START -->
<!-- RUN_HISTORY_END -->
";

    fn meta(timestamp: &str) -> RunMetadata {
        RunMetadata {
            timestamp: timestamp.to_string(),
            command: "jmh".to_string(),
            ..RunMetadata::default()
        }
    }

    #[test]
    fn test_update_report_fills_all_regions() {
        let update = update_report(RESULTS, "results.txt", TEMPLATE, &meta("T1")).unwrap();
        assert_eq!(update.records.len(), 2);

        let latest = document::extract_block_body(&update.document, Region::LatestRun).unwrap();
        assert!(latest.starts_with("### T1 — `jmh`\n"));

        let history = document::extract_block_body(&update.document, Region::RunHistory).unwrap();
        assert!(history.starts_with("### T1 — `jmh` (historical)\n"));

        let summary = document::extract_block_body(&update.document, Region::SummaryTable).unwrap();
        assert!(summary.contains("| datasetA | Decode | SBE | 1,000 | +0.0% | +25.0% |"));
        assert!(summary.contains("| datasetA | Decode | Myra | 800 | -20.0% | +0.0% |"));
        assert!(update.document.starts_with("# Results\n"));
    }

    #[test]
    fn test_update_report_prepends_history() {
        let first = update_report(RESULTS, "r", TEMPLATE, &meta("T1")).unwrap();
        let second = update_report(RESULTS, "r", &first.document, &meta("T2")).unwrap();

        let history = document::extract_block_body(&second.document, Region::RunHistory).unwrap();
        let t2 = history.find("### T2").unwrap();
        let t1 = history.find("### T1").unwrap();
        assert!(t2 < t1);
        assert!(history.contains("| ±10 |\n\n### T1"));

        let latest = document::extract_block_body(&second.document, Region::LatestRun).unwrap();
        assert!(!latest.contains("T1"));
    }

    #[test]
    fn test_update_report_no_data() {
        let err = update_report("Benchmark Mode\n", "r", TEMPLATE, &meta("T")).unwrap_err();
        assert!(matches!(err, ReportError::NoData { .. }));
    }

    #[test]
    fn test_update_report_missing_marker() {
        let doc = TEMPLATE.replace("<!-- SUMMARY_TABLE_END -->", "");
        let err = update_report(RESULTS, "r", &doc, &meta("T")).unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingMarker { region: Region::SummaryTable }
        ));
    }
}
