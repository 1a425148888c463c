// Copyright 2025 Myra Codec Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markdown rendering for benchmark results.
//!
//! Every function here is a pure function of its inputs: the same records and
//! metadata always produce byte-identical output, so reruns against an
//! unchanged results file leave the report unchanged apart from history.

use crate::config::RunMetadata;
use crate::result::BenchmarkRecord;
use crate::summary::{group_records, BASELINE_CODEC};

/// Placeholder for a missing error margin.
pub const MISSING_ERROR: &str = "—";

/// Placeholder for an undefined percentage delta.
pub const NOT_APPLICABLE: &str = "N/A";

const RUN_TABLE_HEADER: &str = "| Codec | Operation | Dataset | Throughput (ops/s) | Error (99.9%) |";
const RUN_TABLE_RULE: &str = "| --- | --- | --- | --- | --- |";
const SUMMARY_TABLE_RULE: &str = "| --- | --- | --- | --- | --- | --- |";

/// Render a number with three decimals and comma-grouped thousands, then
/// drop trailing zeros and a dangling decimal point.
///
/// `12345.6` renders as `12,345.6` and `100.0` as `100`.
pub fn render_number(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Render an error margin as `±<number>`, or a dash when absent.
pub fn render_error(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("±{}", render_number(v)),
        None => MISSING_ERROR.to_string(),
    }
}

/// Render a percentage delta with an explicit sign and one decimal.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        None => NOT_APPLICABLE.to_string(),
        Some(v) if v >= 0.0 => format!("+{v:.1}%"),
        Some(v) => format!("{v:.1}%"),
    }
}

/// Render one run section: heading, metadata list and the results table.
///
/// History entries are rendered with `historical` set, which only changes
/// the heading.
pub fn render_run_section(
    meta: &RunMetadata,
    records: &[BenchmarkRecord],
    historical: bool,
) -> String {
    let heading_suffix = if historical { " (historical)" } else { "" };
    let mut lines = vec![
        format!("### {} — `{}`{}", meta.timestamp, meta.command, heading_suffix),
        String::new(),
        format!("- Host: `{}`", meta.host),
        format!("- JVM: {}", meta.jvm),
        format!(
            "- Warmups: {} × {}, Measurements: {} × {}, Forks: {}",
            meta.warmups, meta.warmup_time, meta.measurements, meta.measurement_time, meta.forks
        ),
    ];
    if let Some(notes) = meta.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!("- Notes: {notes}"));
    }
    lines.push(String::new());
    lines.push(RUN_TABLE_HEADER.to_string());
    lines.push(RUN_TABLE_RULE.to_string());

    let mut sorted: Vec<&BenchmarkRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        a.dataset()
            .cmp(b.dataset())
            .then_with(|| a.operation().rank().cmp(&b.operation().rank()))
            .then_with(|| a.codec().cmp(b.codec()))
    });

    for record in sorted {
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            record.codec(),
            record.operation(),
            record.dataset(),
            render_number(record.score()),
            render_error(record.error()),
        ));
    }

    lines.join("\n")
}

/// Render the cross-codec summary table.
pub fn render_summary(records: &[BenchmarkRecord]) -> String {
    let mut lines = vec![
        format!(
            "| Dataset | Operation | Codec | Throughput (ops/s) | Δ vs best (%) | Δ vs {BASELINE_CODEC} (%) |"
        ),
        SUMMARY_TABLE_RULE.to_string(),
    ];

    for group in group_records(records) {
        for row in group.rows() {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                group.dataset(),
                group.operation(),
                row.record.codec(),
                render_number(row.record.score()),
                format_percent(row.delta_best),
                format_percent(row.delta_baseline),
            ));
        }
    }

    lines.join("\n")
}
