//! JSON report generation.

use crate::models::{Metadata, SizeSummary, Verdict};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Envelope for the JSON output format.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Report generation time.
    pub generated_at: DateTime<Utc>,
    /// CV threshold in percent used for the verdict.
    pub threshold_percent: f64,
    /// Metadata entries in file order.
    pub metadata: &'a Metadata,
    /// Per-size summaries, ascending by size.
    pub results: &'a [SizeSummary],
    /// Overall pass/fail verdict.
    pub verdict: Verdict,
}

/// Generate the pretty-printed JSON report.
pub fn render_json(
    summaries: &[SizeSummary],
    verdict: &Verdict,
    metadata: &Metadata,
    threshold: f64,
) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now(),
        threshold_percent: threshold,
        metadata,
        results: summaries,
        verdict: *verdict,
    };

    serde_json::to_string_pretty(&report).map_err(Into::into)
}
