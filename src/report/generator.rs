//! Table and CSV report generation.
//!
//! Renders per-size summaries either as a human-readable table with a
//! pass/fail verdict or as a machine-readable CSV record list.

use crate::models::{Metadata, SizeSummary, Verdict};

const BANNER_WIDTH: usize = 80;

/// Generate the human-readable table report.
pub fn render_table(
    summaries: &[SizeSummary],
    verdict: &Verdict,
    metadata: &Metadata,
    threshold: f64,
) -> String {
    let mut output = String::new();

    output.push_str(&generate_title_section());
    output.push_str(&generate_metadata_section(metadata));
    output.push_str(&generate_results_section(summaries));
    output.push_str(&generate_legend_section(threshold));
    output.push_str(&generate_summary_section(verdict, threshold));
    output.push_str(&format!("{}\n", "=".repeat(BANNER_WIDTH)));

    output
}

/// Generate the title banner.
fn generate_title_section() -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    format!("{}\nBenchmark Statistical Analysis\n{}\n\n", banner, banner)
}

/// Generate the metadata section, omitted entirely when empty.
fn generate_metadata_section(metadata: &Metadata) -> String {
    if metadata.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("Metadata:\n");
    for entry in metadata {
        section.push_str(&format!("  {}: {}\n", entry.key, entry.value));
    }
    section.push('\n');

    section
}

/// Generate the per-size results table, ascending by size.
fn generate_results_section(summaries: &[SizeSummary]) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "{:<10} {:<8} {:<12} {:<12} {:<8} {:<12} {:<12} {:<10}\n",
        "Size", "Metric", "Median", "σ", "%CV", "p95", "p99", "Status"
    ));
    section.push_str(&format!("{}\n", "-".repeat(BANNER_WIDTH)));

    for summary in summaries {
        section.push_str(&format!(
            "{:<10} {:<8} {:<12.4} {:<12.6} {:<8.2} {:<12.4} {:<12.4} {} {:<8}\n",
            summary.size,
            "cpb",
            summary.cpb.median,
            summary.cpb.stdev,
            summary.cv_percent,
            summary.cpb.p95,
            summary.cpb.p99,
            summary.status.symbol(),
            summary.status.to_string(),
        ));
    }
    section.push('\n');

    section
}

/// Generate the column legend.
fn generate_legend_section(threshold: f64) -> String {
    let mut section = String::new();

    section.push_str("Legend:\n");
    section.push_str("  Median: 50th percentile (target metric)\n");
    section.push_str("  σ: Standard deviation (repeatability)\n");
    section.push_str("  %CV: Coefficient of variation (σ/median × 100)\n");
    section.push_str("  p95/p99: 95th/99th percentile latency\n");
    section.push_str(&format!(
        "  Status: OK if %CV < {}%, WARN otherwise\n",
        threshold
    ));
    section.push('\n');

    section
}

/// Generate the overall verdict block, with remediation hints on failure.
fn generate_summary_section(verdict: &Verdict, threshold: f64) -> String {
    let mut section = String::new();

    let status_line = if verdict.pass {
        "PASS ✓"
    } else {
        "FAIL ⚠ (variance too high)"
    };
    section.push_str(&format!("Overall Status: {}\n", status_line));
    section.push_str(&format!(
        "Max %CV: {:.2}% (threshold: <{}%)\n",
        verdict.max_cv_percent, threshold
    ));

    if !verdict.pass {
        section.push('\n');
        section.push_str(&format!(
            "⚠ WARNING: Variance exceeds {}% threshold!\n",
            threshold
        ));
        section.push_str("  Recommendations:\n");
        section.push_str("  - Disable CPU turbo boost\n");
        section.push_str("  - Set CPU governor to 'performance'\n");
        section.push_str("  - Ensure no background processes\n");
        section.push_str("  - Allow system to cool between runs\n");
    }

    section
}

/// Generate the machine-readable CSV record list.
pub fn render_csv(summaries: &[SizeSummary]) -> String {
    let mut output = String::new();

    output.push_str("size,median_cpb,stdev_cpb,cv_percent,p95_cpb,p99_cpb,count\n");

    for summary in summaries {
        output.push_str(&format!(
            "{},{:.6},{:.6},{:.4},{:.6},{:.6},{}\n",
            summary.size,
            summary.cpb.median,
            summary.cpb.stdev,
            summary.cv_percent,
            summary.cpb.p95,
            summary.cpb.p99,
            summary.cpb.count,
        ));
    }

    output
}
