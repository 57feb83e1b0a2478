//! Record grouping and per-size summarization.
//!
//! Pure functions from parsed records to size-keyed groups and report
//! rows. No side effects; statistics are recomputed from scratch on
//! every invocation.

use crate::analysis::stats::{coefficient_of_variation, compute_stats};
use crate::models::{Group, Record, SizeSummary, Status, Verdict};
use std::collections::BTreeMap;

/// Group records by message size, collecting both metric series in
/// first-seen order. Groups are created on first occurrence of a size
/// and never merged or deleted.
pub fn group_by_size(records: &[Record]) -> BTreeMap<u64, Group> {
    let mut grouped: BTreeMap<u64, Group> = BTreeMap::new();

    for record in records {
        let group = grouped.entry(record.size).or_default();
        group.cycles.push(record.cycles);
        group.cpb.push(record.cpb);
    }

    grouped
}

/// Compute per-size summaries and the overall verdict.
///
/// The verdict is driven by the cpb series: a group is OK when its CV
/// is strictly under `threshold` percent, and the run passes when every
/// group is OK. An empty result set passes with max CV 0.
pub fn summarize_groups(
    grouped: &BTreeMap<u64, Group>,
    threshold: f64,
) -> (Vec<SizeSummary>, Verdict) {
    let mut summaries = Vec::with_capacity(grouped.len());

    for (&size, group) in grouped {
        // Groups always hold at least one record, so both series are
        // non-empty here.
        let (Some(cpb), Some(cycles)) = (compute_stats(&group.cpb), compute_stats(&group.cycles))
        else {
            continue;
        };

        let cv_percent = coefficient_of_variation(cpb.stdev, cpb.median);

        summaries.push(SizeSummary {
            size,
            cpb,
            cycles,
            cv_percent,
            status: Status::from_cv(cv_percent, threshold),
        });
    }

    let max_cv_percent = summaries.iter().map(|s| s.cv_percent).fold(0.0, f64::max);
    let verdict = Verdict {
        pass: max_cv_percent < threshold,
        max_cv_percent,
    };

    (summaries, verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(size: u64, cycles: f64, cpb: f64) -> Record {
        Record { size, cycles, cpb }
    }

    #[test]
    fn test_group_by_size() {
        let records = vec![
            record(64, 100.0, 1.5625),
            record(1024, 1500.0, 1.4648),
            record(64, 102.0, 1.5938),
        ];

        let grouped = group_by_size(&records);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&64].cpb, vec![1.5625, 1.5938]);
        assert_eq!(grouped[&64].cycles, vec![100.0, 102.0]);
        assert_eq!(grouped[&1024].cpb.len(), 1);
    }

    #[test]
    fn test_group_counts_cover_every_record() {
        let records: Vec<Record> = (0..37)
            .map(|i| record(1 << (i % 4), 100.0 + i as f64, 1.5))
            .collect();

        let grouped = group_by_size(&records);
        let total: usize = grouped.values().map(|g| g.cpb.len()).sum();

        assert_eq!(total, records.len());
    }

    #[test]
    fn test_zero_variance_group_is_ok() {
        let records = vec![
            record(64, 100.0, 10.0),
            record(64, 100.0, 10.0),
            record(64, 100.0, 10.0),
        ];

        let (summaries, verdict) = summarize_groups(&group_by_size(&records), 5.0);

        assert_eq!(summaries.len(), 1);
        assert!((summaries[0].cpb.median - 10.0).abs() < f64::EPSILON);
        assert!((summaries[0].cpb.stdev - 0.0).abs() < f64::EPSILON);
        assert!((summaries[0].cv_percent - 0.0).abs() < f64::EPSILON);
        assert_eq!(summaries[0].status, Status::Ok);
        assert!(verdict.pass);
    }

    #[test]
    fn test_cv_exactly_at_threshold_is_warn() {
        // Median 10.0, stdev 0.5 => CV exactly 5.0%.
        let (summaries, verdict) = summarize_groups(
            &group_by_size(&[
                record(64, 100.0, 9.5),
                record(64, 100.0, 10.0),
                record(64, 100.0, 10.5),
            ]),
            5.0,
        );

        assert!((summaries[0].cv_percent - 5.0).abs() < 1e-9);
        assert_eq!(summaries[0].status, Status::Warn);
        assert!(!verdict.pass);
    }

    #[test]
    fn test_noisy_group_fails_verdict() {
        let records = vec![
            record(64, 100.0, 9.0),
            record(64, 100.0, 10.0),
            record(64, 100.0, 11.0),
            record(256, 400.0, 2.0),
            record(256, 400.0, 2.0),
        ];

        let (summaries, verdict) = summarize_groups(&group_by_size(&records), 5.0);

        // Size 64 has CV of 10%, size 256 is perfectly stable.
        assert_eq!(summaries[0].status, Status::Warn);
        assert_eq!(summaries[1].status, Status::Ok);
        assert!(!verdict.pass);
        assert!(verdict.max_cv_percent > 5.0);
    }

    #[test]
    fn test_summaries_are_size_ascending() {
        let records = vec![
            record(4096, 5000.0, 1.2),
            record(64, 100.0, 1.5),
            record(1024, 1400.0, 1.4),
        ];

        let (summaries, _) = summarize_groups(&group_by_size(&records), 5.0);
        let sizes: Vec<u64> = summaries.iter().map(|s| s.size).collect();

        assert_eq!(sizes, vec![64, 1024, 4096]);
    }

    #[test]
    fn test_empty_result_set_passes() {
        let (summaries, verdict) = summarize_groups(&BTreeMap::new(), 5.0);

        assert!(summaries.is_empty());
        assert!(verdict.pass);
        assert!((verdict.max_cv_percent - 0.0).abs() < f64::EPSILON);
    }
}
