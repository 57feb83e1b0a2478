//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cyclestat - variance analyzer for cycle-accurate benchmark logs
///
/// Reads a benchmark measurement log (`size,cycles,cpb` data rows with
/// `# key: value` metadata comments), groups observations by message size,
/// and reports median/σ/p95/p99 per size with a coefficient-of-variation
/// stability check. Exits non-zero when variance exceeds the threshold,
/// so it can gate CI on unstable measurement environments.
///
/// Examples:
///   cyclestat results/evp_benchmark.csv
///   cyclestat results/evp_benchmark.csv --format csv
///   cyclestat results/evp_benchmark.csv --threshold 2.5
///   cyclestat --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Benchmark measurement CSV file to analyze
    ///
    /// Not required when using --init-config.
    #[arg(value_name = "CSV_FILE", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Output format (table, csv, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Coefficient-of-variation threshold in percent
    ///
    /// Size groups at or above this CV are marked WARN and fail the run.
    /// Can also be set via CYCLESTAT_THRESHOLD or .cyclestat.toml.
    #[arg(long, value_name = "PCT", env = "CYCLESTAT_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .cyclestat.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .cyclestat.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    /// Machine-readable CSV record list
    Csv,
    /// Pretty-printed JSON document
    Json,
}

impl Args {
    /// Get the input path, falling back to empty (validated before use).
    pub fn input_path(&self) -> &Path {
        self.input.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate threshold if provided
        if let Some(threshold) = self.threshold {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err("Threshold must be a positive number of percent".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// Default is WARN, not INFO: stdout carries the report and stderr
    /// stays silent on a clean run.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
