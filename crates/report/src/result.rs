// Copyright 2025 Myra Codec Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark record types.
//!
//! This module provides the [`BenchmarkRecord`] struct produced by the
//! parser, and the naming-convention rules that derive a codec and an
//! operation from a fully-qualified JMH benchmark name such as
//! `express.mvp.myra.codec.bench.codecs.sbe.SbeOrderBookBenchmark.decode`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class-name suffixes removed before codec lookup, most specific first.
const CODEC_SUFFIXES: &[&str] = &["OrderBookBenchmark", "Benchmark"];

/// Display names for known codecs, keyed by the lower-cased stripped class name.
const CODEC_OVERRIDES: &[(&str, &str)] = &[
    ("sbe", "SBE"),
    ("myra", "Myra"),
    ("kryo", "Kryo"),
    ("avro", "Avro"),
    ("flatbuffers", "FlatBuffers"),
];

/// The benchmarked action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operation {
    /// Any method whose name starts with `decode`.
    Decode,
    /// Any method whose name starts with `encode`.
    Encode,
    /// Method name kept verbatim.
    Other(String),
}

impl Operation {
    /// Sort rank used by every table: decode, then encode, then the rest.
    pub fn rank(&self) -> u8 {
        match self {
            Operation::Decode => 0,
            Operation::Encode => 1,
            Operation::Other(_) => 99,
        }
    }

    /// Label as shown in the report.
    pub fn as_str(&self) -> &str {
        match self {
            Operation::Decode => "Decode",
            Operation::Encode => "Encode",
            Operation::Other(name) => name,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Operation {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Decode" => Operation::Decode,
            "Encode" => Operation::Encode,
            _ => Operation::Other(label),
        }
    }
}

impl From<Operation> for String {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

/// One measured result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    codec: String,
    operation: Operation,
    dataset: String,
    score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<f64>,
}

impl BenchmarkRecord {
    /// Create a record from already-derived parts.
    pub fn new(
        codec: impl Into<String>,
        operation: Operation,
        dataset: impl Into<String>,
        score: f64,
        error: Option<f64>,
    ) -> Self {
        Self {
            codec: codec.into(),
            operation,
            dataset: dataset.into(),
            score,
            error,
        }
    }

    /// Create a record from a raw benchmark name, deriving codec and operation.
    pub fn from_benchmark(
        benchmark: &str,
        dataset: impl Into<String>,
        score: f64,
        error: Option<f64>,
    ) -> Self {
        Self::new(
            extract_codec(benchmark),
            extract_operation(benchmark),
            dataset,
            score,
            error,
        )
    }

    /// Codec display name.
    pub fn codec(&self) -> &str {
        &self.codec
    }

    /// Operation kind.
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Dataset identifier.
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Throughput in ops/s.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Measurement error, if the row carried one.
    pub fn error(&self) -> Option<f64> {
        self.error
    }

    /// Key used to bucket records for the summary table.
    pub fn summary_key(&self) -> (&str, &Operation) {
        (&self.dataset, &self.operation)
    }
}

/// Derive the codec display name from a fully-qualified benchmark name.
///
/// Takes the enclosing class name (second-to-last dot segment), strips the
/// known suffixes and maps the result through the override table. Unknown
/// names are kept as stripped; if stripping leaves nothing, the class name
/// itself is returned.
pub fn extract_codec(benchmark: &str) -> String {
    let mut segments = benchmark.rsplit('.');
    let last = segments.next().unwrap_or(benchmark);
    let class_name = segments.next().unwrap_or(last);

    let mut codec = class_name;
    for suffix in CODEC_SUFFIXES {
        if let Some(stripped) = codec.strip_suffix(suffix) {
            codec = stripped;
        }
    }

    let lowered = codec.to_lowercase();
    if let Some((_, display)) = CODEC_OVERRIDES.iter().find(|(key, _)| *key == lowered) {
        return (*display).to_string();
    }

    if codec.is_empty() {
        class_name.to_string()
    } else {
        codec.to_string()
    }
}

/// Classify the benchmark method (last dot segment) as an [`Operation`].
pub fn extract_operation(benchmark: &str) -> Operation {
    let method = benchmark.rsplit('.').next().unwrap_or(benchmark);
    let lowered = method.to_lowercase();
    if lowered.starts_with("encode") {
        Operation::Encode
    } else if lowered.starts_with("decode") {
        Operation::Decode
    } else {
        Operation::Other(method.to_string())
    }
}
