//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.cyclestat.toml` files.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// CV threshold in percent; groups at or above it are WARN.
    #[serde(default = "default_cv_threshold")]
    pub cv_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cv_threshold: default_cv_threshold(),
        }
    }
}

fn default_cv_threshold() -> f64 {
    5.0
}

/// Report generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".cyclestat.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(threshold) = args.threshold {
            self.analysis.cv_threshold = threshold;
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!((config.analysis.cv_threshold - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.report.format, OutputFormat::Table);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[analysis]
cv_threshold = 2.5

[report]
format = "csv"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!((config.analysis.cv_threshold - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.report.format, OutputFormat::Csv);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[report]\nformat = \"json\"\n").unwrap();

        assert!((config.analysis.cv_threshold - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.report.format, OutputFormat::Json);
    }

    #[test]
    fn test_merge_with_args_cli_wins() {
        let mut config = Config::default();
        let args = Args {
            input: None,
            format: Some(OutputFormat::Csv),
            threshold: Some(3.0),
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        };

        config.merge_with_args(&args);

        assert!((config.analysis.cv_threshold - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.report.format, OutputFormat::Csv);
    }

    #[test]
    fn test_merge_with_args_keeps_config_when_cli_silent() {
        let mut config: Config = toml::from_str("[analysis]\ncv_threshold = 1.5\n").unwrap();
        let args = Args {
            input: None,
            format: None,
            threshold: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        };

        config.merge_with_args(&args);

        assert!((config.analysis.cv_threshold - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.report.format, OutputFormat::Table);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[analysis]"));
        assert!(toml_str.contains("cv_threshold"));
        assert!(toml_str.contains("[report]"));
    }
}
