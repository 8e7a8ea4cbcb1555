//! Output JSON schema definitions for analysis reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{ProfileAggregate, ShardSummary, TimingEntry};
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Input file the report was built from
    pub source: String,

    /// Timestamp when report was generated
    pub generated_at: String,

    /// Query plus fetch time over all shards
    pub total_time_ms: f64,

    /// Shards ranked by share of total time
    pub shards: Vec<ShardSummary>,

    /// Full query timing breakdown
    pub query_timings: Vec<TimingRow>,

    /// Top child timing rows
    pub child_timings: Vec<TimingRow>,
}

/// A `(type, field)` timing in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingRow {
    #[serde(rename = "type")]
    pub query_type: String,
    pub field: String,
    pub time_ms: f64,
}

impl From<&TimingEntry> for TimingRow {
    fn from(entry: &TimingEntry) -> Self {
        Self {
            query_type: entry.key.query_type.clone(),
            field: entry.key.field.clone(),
            time_ms: entry.time_ms(),
        }
    }
}

/// Convert an aggregate to the report format
///
/// **Public** - used by commands to create final output
///
/// Only the first `top_children` child timings are kept, matching what
/// the terminal summary shows.
pub fn to_report(aggregate: &ProfileAggregate, source: &str, top_children: usize) -> AnalysisReport {
    use chrono::Utc;

    AnalysisReport {
        version: SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        total_time_ms: aggregate.total_time_ms(),
        shards: aggregate.shards.clone(),
        query_timings: aggregate.query_timings.iter().map(TimingRow::from).collect(),
        child_timings: aggregate
            .child_timings
            .iter()
            .take(top_children)
            .map(TimingRow::from)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::TimingKey;

    #[test]
    fn test_to_report_truncates_children() {
        let aggregate = ProfileAggregate {
            shards: Vec::new(),
            total_time_nanos: 2_000_000,
            query_timings: vec![TimingEntry::new(TimingKey::new("term", "status"), 2_000_000)],
            child_timings: (0..8)
                .map(|i| TimingEntry::new(TimingKey::new("child", format!("f{}", i)), 10 - i))
                .collect(),
        };

        let report = to_report(&aggregate, "profile.json", 5);

        assert_eq!(report.version, SCHEMA_VERSION);
        assert_eq!(report.total_time_ms, 2.0);
        assert_eq!(report.query_timings[0].time_ms, 2.0);
        assert_eq!(report.child_timings.len(), 5);
        assert_eq!(report.child_timings[0].field, "f0");
    }

    #[test]
    fn test_timing_row_serializes_type_key() {
        let row = TimingRow {
            query_type: "term".to_string(),
            field: "status".to_string(),
            time_ms: 1.5,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["type"], "term");
        assert_eq!(json["time_ms"], 1.5);
    }
}
