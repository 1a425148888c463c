// Copyright 2025 Myra Codec Contributors
// SPDX-License-Identifier: Apache-2.0

//! Marker-delimited region patching for the results document.
//!
//! The report template carries three regions, each wrapped in an HTML comment
//! pair:
//!
//! ```text
//! <!-- LATEST_RUN_START -->
//! ...generated...
//! <!-- LATEST_RUN_END -->
//! ```
//!
//! Only the interior of the requested region is touched. Each marker must
//! occur exactly once and the start marker must precede the end marker;
//! anything else is a broken template and is reported, never repaired.

use crate::error::{ReportError, Result};
use std::fmt;
use tracing::debug;

/// A generated region of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// The most recent run.
    LatestRun,
    /// Every run, newest first.
    RunHistory,
    /// Cross-codec comparison of the most recent run.
    SummaryTable,
}

impl Region {
    /// All regions, in document order.
    pub const ALL: [Region; 3] = [Region::LatestRun, Region::RunHistory, Region::SummaryTable];

    /// Marker base name.
    pub fn name(&self) -> &'static str {
        match self {
            Region::LatestRun => "LATEST_RUN",
            Region::RunHistory => "RUN_HISTORY",
            Region::SummaryTable => "SUMMARY_TABLE",
        }
    }

    /// Opening marker line.
    pub fn start_marker(&self) -> String {
        format!("<!-- {}_START -->", self.name())
    }

    /// Closing marker line.
    pub fn end_marker(&self) -> String {
        format!("<!-- {}_END -->", self.name())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte span of a region interior, between the two markers.
fn locate(content: &str, region: Region) -> Result<(usize, usize)> {
    let start_marker = region.start_marker();
    let end_marker = region.end_marker();

    let mut starts = content.match_indices(&start_marker).map(|(i, _)| i);
    let mut ends = content.match_indices(&end_marker).map(|(i, _)| i);

    let (Some(start), Some(end)) = (starts.next(), ends.next()) else {
        return Err(ReportError::MissingMarker { region });
    };
    if starts.next().is_some() {
        return Err(ReportError::MalformedMarkers {
            region,
            reason: "start marker occurs more than once",
        });
    }
    if ends.next().is_some() {
        return Err(ReportError::MalformedMarkers {
            region,
            reason: "end marker occurs more than once",
        });
    }
    if end < start {
        return Err(ReportError::MalformedMarkers {
            region,
            reason: "end marker precedes start marker",
        });
    }

    Ok((start + start_marker.len(), end))
}

/// Replace the interior of `region` with `replacement`.
///
/// The markers are kept and the new body is wrapped in one leading and one
/// trailing newline. Text outside the region is returned unchanged.
pub fn replace_block(content: &str, region: Region, replacement: &str) -> Result<String> {
    let (body_start, body_end) = locate(content, region)?;

    let mut out = String::with_capacity(content.len() + replacement.len());
    out.push_str(&content[..body_start]);
    out.push('\n');
    out.push_str(replacement);
    out.push('\n');
    out.push_str(&content[body_end..]);

    debug!(%region, bytes = replacement.len(), "Replaced document region");
    Ok(out)
}

/// Current interior of `region`, trimmed.
pub fn extract_block_body(content: &str, region: Region) -> Result<String> {
    let (body_start, body_end) = locate(content, region)?;
    Ok(content[body_start..body_end].trim().to_string())
}

/// Put `new_section` in front of the existing history, separated by a blank line.
pub fn prepend_history(existing: &str, new_section: &str) -> String {
    if existing.is_empty() {
        new_section.to_string()
    } else {
        format!("{new_section}\n\n{existing}")
    }
}

/// Check that every region's markers are present and well-formed.
pub fn validate_markers(content: &str) -> Result<()> {
    for region in Region::ALL {
        locate(content, region)?;
    }
    Ok(())
}
