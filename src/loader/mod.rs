//! Measurement log loader.
//!
//! Reads a line-oriented benchmark log, separating `#` metadata comments
//! from `size,cycles,cpb` data lines. Malformed data lines are dropped
//! without aborting the load; an unreadable file is fatal.

use crate::models::{Metadata, MetadataEntry, Record};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Load and parse a measurement file.
///
/// Returns the metadata mapping and every data row that parsed cleanly.
/// The record count may be less than the input line count.
pub fn load_file(path: &Path) -> Result<(Metadata, Vec<Record>)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    Ok(parse_content(&content))
}

/// Parse file content that is already in memory.
pub fn parse_content(content: &str) -> (Metadata, Vec<Record>) {
    let mut metadata: Metadata = Vec::new();
    let mut records = Vec::new();

    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.trim();

        if line.is_empty() {
            continue;
        }

        // Metadata line: `# key: value`. Colon-less comments carry nothing.
        if let Some(rest) = line.strip_prefix('#') {
            if let Some((key, value)) = rest.split_once(':') {
                upsert_metadata(&mut metadata, key.trim(), value.trim());
            }
            continue;
        }

        match parse_record(line) {
            Some(record) => records.push(record),
            None => debug!("Skipping malformed data line {}: {}", lineno + 1, line),
        }
    }

    (metadata, records)
}

/// Insert or overwrite a metadata entry. Last value wins, but the key
/// keeps its first-seen position for display.
fn upsert_metadata(metadata: &mut Metadata, key: &str, value: &str) {
    if let Some(entry) = metadata.iter_mut().find(|e| e.key == key) {
        entry.value = value.to_string();
    } else {
        metadata.push(MetadataEntry {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
}

/// Parse one data line: exactly three comma-separated numeric fields.
fn parse_record(line: &str) -> Option<Record> {
    let mut fields = line.split(',');

    let size = fields.next()?.trim().parse().ok()?;
    let cycles = fields.next()?.trim().parse().ok()?;
    let cpb = fields.next()?.trim().parse().ok()?;

    // A fourth field means the line is malformed, not extended.
    if fields.next().is_some() {
        return None;
    }

    Some(Record { size, cycles, cpb })
}
