//! Analysis stages: grouping, summarization, and descriptive statistics.

pub mod aggregator;
pub mod stats;

pub use aggregator::{group_by_size, summarize_groups};
