// Copyright 2025 Myra Codec Contributors
// SPDX-License-Identifier: Apache-2.0

//! Cross-codec aggregation for the summary table.
//!
//! Records are bucketed by `(dataset, operation)`. Within a bucket every codec
//! is compared against the fastest entry and against the baseline codec.

use crate::result::{BenchmarkRecord, Operation};
use std::collections::HashMap;
use tracing::warn;

/// Codec every other codec is compared against.
pub const BASELINE_CODEC: &str = "Myra";

/// Percentage change of `value` relative to `baseline`.
///
/// Returns `None` when there is no baseline or the baseline is zero.
pub fn percent_delta(value: f64, baseline: Option<f64>) -> Option<f64> {
    match baseline {
        Some(base) if base != 0.0 => Some((value / base - 1.0) * 100.0),
        _ => None,
    }
}

/// All records sharing one `(dataset, operation)` key.
#[derive(Debug, Clone)]
pub struct SummaryGroup<'a> {
    dataset: &'a str,
    operation: &'a Operation,
    records: Vec<&'a BenchmarkRecord>,
}

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow<'a> {
    /// The measured record.
    pub record: &'a BenchmarkRecord,
    /// Delta against the best score in the group.
    pub delta_best: Option<f64>,
    /// Delta against the baseline codec's score in the group.
    pub delta_baseline: Option<f64>,
}

impl<'a> SummaryGroup<'a> {
    /// Dataset of this group.
    pub fn dataset(&self) -> &'a str {
        self.dataset
    }

    /// Operation of this group.
    pub fn operation(&self) -> &'a Operation {
        self.operation
    }

    /// Records in input order.
    pub fn records(&self) -> &[&'a BenchmarkRecord] {
        &self.records
    }

    /// Highest score in the group.
    pub fn best(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.score())
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Score of the baseline codec, if it took part.
    pub fn baseline(&self) -> Option<f64> {
        self.records
            .iter()
            .find(|r| r.codec().eq_ignore_ascii_case(BASELINE_CODEC))
            .map(|r| r.score())
    }

    /// Rows sorted by codec, with both deltas computed.
    pub fn rows(&self) -> Vec<SummaryRow<'a>> {
        let best = self.best();
        let baseline = self.baseline();

        let mut records = self.records.clone();
        records.sort_by(|a, b| a.codec().cmp(b.codec()));

        records
            .into_iter()
            .map(|record| SummaryRow {
                record,
                delta_best: percent_delta(record.score(), Some(best)),
                delta_baseline: percent_delta(record.score(), baseline),
            })
            .collect()
    }
}

/// Bucket records by `(dataset, operation)`.
///
/// Groups come back ordered by dataset, then operation rank. Operations
/// sharing a rank keep first-seen order.
pub fn group_records(records: &[BenchmarkRecord]) -> Vec<SummaryGroup<'_>> {
    let mut index: HashMap<(&str, &Operation), usize> = HashMap::new();
    let mut groups: Vec<SummaryGroup<'_>> = Vec::new();

    for record in records {
        let key = record.summary_key();
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(SummaryGroup {
                dataset: record.dataset(),
                operation: record.operation(),
                records: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].records.push(record);
    }

    groups.sort_by(|a, b| {
        a.dataset
            .cmp(b.dataset)
            .then_with(|| a.operation.rank().cmp(&b.operation.rank()))
    });

    for group in &groups {
        if group.baseline().is_none() {
            warn!(
                dataset = group.dataset,
                operation = %group.operation,
                "No {} baseline in group",
                BASELINE_CODEC
            );
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(codec: &str, op: Operation, dataset: &str, score: f64) -> BenchmarkRecord {
        BenchmarkRecord::new(codec, op, dataset, score, None)
    }

    fn assert_delta(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("delta should be defined");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_percent_delta() {
        assert_delta(percent_delta(120.0, Some(100.0)), 20.0);
        assert_delta(percent_delta(80.0, Some(100.0)), -20.0);
        assert_eq!(percent_delta(5.0, Some(0.0)), None);
        assert_eq!(percent_delta(5.0, None), None);
    }

    #[test]
    fn test_group_records_buckets_by_dataset_and_operation() {
        let records = vec![
            record("SBE", Operation::Encode, "a", 1.0),
            record("SBE", Operation::Decode, "a", 2.0),
            record("Myra", Operation::Decode, "a", 3.0),
            record("Myra", Operation::Decode, "b", 4.0),
        ];
        let groups = group_records(&records);
        let keys: Vec<_> = groups
            .iter()
            .map(|g| (g.dataset(), g.operation().as_str(), g.records().len()))
            .collect();
        assert_eq!(
            keys,
            vec![("a", "Decode", 2), ("a", "Encode", 1), ("b", "Decode", 1)]
        );
    }

    #[test]
    fn test_other_operations_sort_after_encode() {
        let records = vec![
            record("SBE", Operation::Other("roundTrip".into()), "a", 1.0),
            record("SBE", Operation::Encode, "a", 1.0),
        ];
        let groups = group_records(&records);
        assert_eq!(groups[0].operation(), &Operation::Encode);
        assert_eq!(groups[1].operation().as_str(), "roundTrip");
    }

    #[test]
    fn test_best_and_baseline() {
        let records = vec![
            record("SBE", Operation::Decode, "a", 1000.0),
            record("myra", Operation::Decode, "a", 800.0),
        ];
        let groups = group_records(&records);
        assert_eq!(groups[0].best(), 1000.0);
        assert_eq!(groups[0].baseline(), Some(800.0));
    }

    #[test]
    fn test_rows_deltas() {
        let records = vec![
            record("SBE", Operation::Decode, "a", 1000.0),
            record("Myra", Operation::Decode, "a", 800.0),
        ];
        let groups = group_records(&records);
        let rows = groups[0].rows();

        assert_eq!(rows[0].record.codec(), "Myra");
        assert_delta(rows[0].delta_best, -20.0);
        assert_eq!(rows[0].delta_baseline, Some(0.0));

        assert_eq!(rows[1].record.codec(), "SBE");
        assert_eq!(rows[1].delta_best, Some(0.0));
        assert_delta(rows[1].delta_baseline, 25.0);
    }

    #[test]
    fn test_rows_without_baseline() {
        let records = vec![
            record("SBE", Operation::Decode, "a", 10.0),
            record("Kryo", Operation::Decode, "a", 5.0),
        ];
        let groups = group_records(&records);
        assert!(groups[0].rows().iter().all(|r| r.delta_baseline.is_none()));
    }

    #[test]
    fn test_zero_baseline_is_not_applicable() {
        let records = vec![
            record("SBE", Operation::Decode, "a", 10.0),
            record("Myra", Operation::Decode, "a", 0.0),
        ];
        let groups = group_records(&records);
        assert!(groups[0].rows().iter().all(|r| r.delta_baseline.is_none()));
    }
}
