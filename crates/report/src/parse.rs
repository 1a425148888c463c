// Copyright 2025 Myra Codec Contributors
// SPDX-License-Identifier: Apache-2.0

//! JMH text output parsing.
//!
//! A data row looks like
//!
//! ```text
//! <qualified-benchmark-name> <dataset> <mode> [<count>] <score> [± <error>] ops/s
//! ```
//!
//! Everything else (the column header, blank lines, log banners) is noise and
//! is skipped.

use crate::error::{ReportError, Result};
use crate::result::BenchmarkRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

/// Lines starting with this token are the JMH column header.
const HEADER_TOKEN: &str = "Benchmark";

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<benchmark>\S+)\s+(?P<dataset>\S+)\s+\S+\s+(?:(?P<count>\d+)\s+)?(?P<score>[\d.]+)(?:\s+±\s+(?P<error>[\d.]+))?\s+ops/s$",
    )
    .expect("row pattern is valid")
});

/// Parse JMH results text into records, preserving input order.
///
/// `source_name` only labels the [`ReportError::NoData`] error.
pub fn parse_results(text: &str, source_name: &str) -> Result<Vec<BenchmarkRecord>> {
    let mut records = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(HEADER_TOKEN) {
            continue;
        }
        let Some(caps) = LINE_RE.captures(line) else {
            trace!(line = index + 1, "Skipping non-data line");
            continue;
        };

        let line_no = index + 1;
        let score = parse_number(&caps["score"], "score", line_no)?;
        let error = caps
            .name("error")
            .map(|m| parse_number(m.as_str(), "error", line_no))
            .transpose()?;

        records.push(BenchmarkRecord::from_benchmark(
            &caps["benchmark"],
            &caps["dataset"],
            score,
            error,
        ));
    }

    if records.is_empty() {
        return Err(ReportError::NoData {
            source_name: source_name.to_string(),
        });
    }

    debug!(count = records.len(), source = source_name, "Parsed benchmark rows");
    Ok(records)
}

fn parse_number(value: &str, field: &'static str, line: usize) -> Result<f64> {
    value.parse::<f64>().map_err(|_| ReportError::MalformedRow {
        line,
        field,
        value: value.to_string(),
    })
}
