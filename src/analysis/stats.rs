//! Descriptive statistics over a single metric series.

use crate::models::Stats;

/// Compute count, mean, median, sample stdev, min, max, p95, p99.
///
/// Returns `None` for an empty series. Groups are only created with at
/// least one record, so callers treat the empty case as unreachable, but
/// the function stays total.
pub fn compute_stats(values: &[f64]) -> Option<Stats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();

    let mean = sorted.iter().sum::<f64>() / n as f64;

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let stdev = if n < 2 {
        0.0
    } else {
        let variance =
            sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };

    Some(Stats {
        count: n,
        mean,
        median,
        stdev,
        min: sorted[0],
        max: sorted[n - 1],
        p95: nearest_rank(&sorted, 0.95),
        p99: nearest_rank(&sorted, 0.99),
    })
}

/// Nearest-rank percentile: the element at index `floor(n * q)` in the
/// sorted series, 0-based, clamped to the last element. No interpolation;
/// downstream consumers of the CSV output depend on this exact rule.
fn nearest_rank(sorted: &[f64], q: f64) -> f64 {
    let idx = ((sorted.len() as f64 * q) as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Coefficient of variation in percent: stdev / median * 100.
///
/// Defined as 0 when the median is not positive. That should not occur
/// for valid cpb data, but must not divide by zero.
pub fn coefficient_of_variation(stdev: f64, median: f64) -> f64 {
    if median > 0.0 {
        stdev / median * 100.0
    } else {
        0.0
    }
}
