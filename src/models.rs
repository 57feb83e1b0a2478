//! Data models for the benchmark analyzer.
//!
//! This module contains the core data structures used throughout
//! the application for representing measurements, groups, and
//! per-group statistics.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Stability status of a single size group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Variance is within the configured threshold.
    Ok,
    /// Variance exceeds the configured threshold.
    Warn,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Warn => write!(f, "WARN"),
        }
    }
}

impl Status {
    /// Classify a coefficient of variation against a threshold.
    ///
    /// The comparison is strict: a CV exactly at the threshold is WARN.
    pub fn from_cv(cv_percent: f64, threshold: f64) -> Self {
        if cv_percent < threshold {
            Status::Ok
        } else {
            Status::Warn
        }
    }

    /// Returns a marker symbol for table output.
    pub fn symbol(&self) -> &'static str {
        match self {
            Status::Ok => "✓",
            Status::Warn => "⚠",
        }
    }
}

/// One key-value pair extracted from a `#` comment line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
}

/// File metadata in insertion order. Duplicate keys overwrite in place,
/// keeping the first-seen position for display.
pub type Metadata = Vec<MetadataEntry>;

/// One parsed observation from the measurement log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Message size in bytes, the grouping key.
    pub size: u64,
    /// Raw CPU cycles for the operation.
    pub cycles: f64,
    /// Cycles per byte, the normalized throughput metric.
    pub cpb: f64,
}

/// Metric series accumulated across all records sharing one message size.
#[derive(Debug, Clone, Default)]
pub struct Group {
    /// CPU cycle samples in first-seen order.
    pub cycles: Vec<f64>,
    /// Cycles-per-byte samples in first-seen order.
    pub cpb: Vec<f64>,
}

/// Descriptive statistics for one metric series.
///
/// Purely a projection of a group's samples; recomputed from scratch
/// on every run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Stats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation, 0 when count <= 1.
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
    /// 95th percentile, nearest-rank (no interpolation).
    pub p95: f64,
    /// 99th percentile, nearest-rank (no interpolation).
    pub p99: f64,
}

/// Report row for one message size.
#[derive(Debug, Clone, Serialize)]
pub struct SizeSummary {
    /// Message size in bytes.
    pub size: u64,
    /// Statistics over the cycles-per-byte series (drives the verdict).
    pub cpb: Stats,
    /// Statistics over the raw cycle series.
    pub cycles: Stats,
    /// Coefficient of variation of cpb, in percent.
    pub cv_percent: f64,
    /// Stability classification against the configured threshold.
    pub status: Status,
}

/// Overall verdict across all size groups.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Verdict {
    /// True when every group's CV is under the threshold.
    pub pass: bool,
    /// Maximum CV observed across groups, 0 for an empty result set.
    pub max_cv_percent: f64,
}

/// Fatal analysis errors surfaced to the user.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No valid data rows found in {0}")]
    EmptyDataset(String),
}
