//! Cyclestat - Benchmark Variance Analyzer
//!
//! A CLI tool that ingests cycle-accurate benchmark measurement logs
//! (message size, CPU cycles, cycles-per-byte), groups observations by
//! message size, and reports per-size descriptive statistics with a
//! coefficient-of-variation stability check.
//!
//! Exit codes:
//!   0 - Analysis succeeded and every size group is within the CV threshold
//!   1 - Usage error, unreadable input, empty dataset, runtime error, or
//!       at least one size group over the CV threshold (intentional
//!       conflation, used for CI gating)

mod analysis;
mod cli;
mod config;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, OutputFormat};
use config::Config;
use models::AnalysisError;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments. clap's native error exit code is 2;
    // usage errors here must exit 1, so the error path is handled manually.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e)
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion =>
        {
            let _ = e.print();
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    // Run the analysis
    match run_analysis(&args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .cyclestat.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".cyclestat.toml");

    if path.exists() {
        eprintln!(".cyclestat.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .cyclestat.toml")?;

    println!("Created .cyclestat.toml with default settings.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Log lines go to stderr: stdout is reserved for the rendered report.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete analysis pipeline. Returns exit code (0 or 1).
fn run_analysis(args: &Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(args)?;
    config.merge_with_args(args);

    let threshold = config.analysis.cv_threshold;
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(anyhow::anyhow!(
            "CV threshold must be a positive number of percent (got {})",
            threshold
        ));
    }

    let input = args.input_path();
    info!("Analyzing {}", input.display());

    // Stage 1: load the measurement file
    let (metadata, records) = loader::load_file(input)?;
    debug!(
        "Parsed {} metadata entries and {} valid records",
        metadata.len(),
        records.len()
    );

    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset(input.display().to_string()).into());
    }

    // Stage 2 + 3: group by size and compute per-group statistics
    let grouped = analysis::group_by_size(&records);
    let (summaries, verdict) = analysis::summarize_groups(&grouped, threshold);

    // Stage 4: render the report
    let output = match config.report.format {
        OutputFormat::Table => report::render_table(&summaries, &verdict, &metadata, threshold),
        OutputFormat::Csv => report::render_csv(&summaries),
        OutputFormat::Json => report::render_json(&summaries, &verdict, &metadata, threshold)?,
    };
    print!("{}", output);

    // Exit code doubles as the variance gate.
    Ok(if verdict.pass { 0 } else { 1 })
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .cyclestat.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_args(input: PathBuf) -> Args {
        Args {
            input: Some(input),
            format: None,
            threshold: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    fn write_input(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("bench.csv");
        std::fs::write(&path, content).unwrap();
        path
    }

    // Pin --config to an empty file so a stray .cyclestat.toml in the
    // working directory cannot leak into the test.
    fn empty_config(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_stable_input_exits_zero() {
        let dir = TempDir::new().unwrap();
        let path = write_input(
            &dir,
            "# impl: aes-gcm-vaes\n64,100.0,1.5625\n64,100.2,1.5656\n64,99.8,1.5594\n",
        );
        let mut args = make_args(path);
        args.config = Some(empty_config(&dir));

        assert_eq!(run_analysis(&args).unwrap(), 0);
    }

    #[test]
    fn test_noisy_input_exits_one() {
        let dir = TempDir::new().unwrap();
        // CV for the cpb series is 6%: median 10.0, stdev 0.6.
        let path = write_input(&dir, "64,100.0,9.4\n64,100.0,10.0\n64,100.0,10.6\n");
        let mut args = make_args(path);
        args.config = Some(empty_config(&dir));

        assert_eq!(run_analysis(&args).unwrap(), 1);
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut args = make_args(dir.path().join("nope.csv"));
        args.config = Some(empty_config(&dir));

        let err = run_analysis(&args).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_all_rows_malformed_is_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, "# only: metadata\nabc,1.0,2.0\n");
        let mut args = make_args(path);
        args.config = Some(empty_config(&dir));

        let err = run_analysis(&args).unwrap_err();
        assert!(err.to_string().contains("No valid data rows found"));
    }
}
