//! Aggregate a parsed profile document into ranked timing breakdowns.
//!
//! The walk is fixed-depth: shard → search → query → direct children.
//! Query and fetch time add up into each shard total and the grand total.
//! Child time is collected as a separate breakdown and never added to
//! either total.

use super::metrics::{nanos_to_millis, percentage_of};
use super::timing_builder::{TimingAccumulator, TimingEntry};
use crate::parser::schema::{ProfileDocument, ShardRecord};
use log::debug;
use serde::{Deserialize, Serialize};

/// Per-shard timing summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardSummary {
    pub index: String,
    pub shard_id: String,
    pub total_time_ms: f64,
    pub query_time_ms: f64,
    pub fetch_time_ms: f64,

    /// Share of the overall time spent in this shard
    pub percentage: f64,
}

/// Result of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileAggregate {
    /// Shards ranked by percentage, descending
    pub shards: Vec<ShardSummary>,

    /// Sum of query and fetch time over all shards
    pub total_time_nanos: u64,

    /// Top-level query time by `(type, field)`, descending
    pub query_timings: Vec<TimingEntry>,

    /// Direct child time by `(type, field)`, descending
    pub child_timings: Vec<TimingEntry>,
}

impl ProfileAggregate {
    pub fn total_time_ms(&self) -> f64 {
        nanos_to_millis(self.total_time_nanos)
    }

    /// Whether the document contained no shards
    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }
}

/// Aggregate a profile document
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `document` - Parsed profile document
///
/// # Returns
/// Ranked shard summaries, the grand total in nanoseconds, and the query
/// and child timing breakdowns
///
/// # Algorithm
/// 1. Sum top-level query time and fetch time per shard
/// 2. Accumulate query and child time by `(type, field)`
/// 3. Compute each shard's share of the grand total
/// 4. Sort every list by time, descending (stable)
pub fn aggregate(document: &ProfileDocument) -> ProfileAggregate {
    debug!("Aggregating {} shards", document.shards.len());

    let mut query_acc = TimingAccumulator::new();
    let mut child_acc = TimingAccumulator::new();
    let mut total_time_nanos: u64 = 0;

    let mut shards: Vec<ShardSummary> = document
        .shards
        .iter()
        .map(|shard| {
            let shard_total = accumulate_shard(shard, &mut query_acc, &mut child_acc);
            total_time_nanos = total_time_nanos.saturating_add(shard_total.total());
            shard_total.into_summary(shard)
        })
        .collect();

    let total_time_ms = nanos_to_millis(total_time_nanos);
    for shard in &mut shards {
        shard.percentage = percentage_of(shard.total_time_ms, total_time_ms);
    }

    shards.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

    debug!(
        "Aggregated {} ns across {} shards, {} query keys, {} child keys",
        total_time_nanos,
        shards.len(),
        query_acc.len(),
        child_acc.len()
    );

    ProfileAggregate {
        shards,
        total_time_nanos,
        query_timings: query_acc.into_sorted(),
        child_timings: child_acc.into_sorted(),
    }
}

/// Query and fetch nanoseconds of a single shard
#[derive(Debug, Clone, Copy, Default)]
struct ShardTotals {
    query_nanos: u64,
    fetch_nanos: u64,
}

impl ShardTotals {
    fn total(&self) -> u64 {
        self.query_nanos.saturating_add(self.fetch_nanos)
    }

    /// Percentage is filled in once the grand total is known
    fn into_summary(self, shard: &ShardRecord) -> ShardSummary {
        ShardSummary {
            index: shard.index.clone(),
            shard_id: shard.shard_id.clone(),
            total_time_ms: nanos_to_millis(self.total()),
            query_time_ms: nanos_to_millis(self.query_nanos),
            fetch_time_ms: nanos_to_millis(self.fetch_nanos),
            percentage: 0.0,
        }
    }
}

/// Walk one shard, feeding both accumulators
///
/// **Private** - internal helper for aggregate
fn accumulate_shard(
    shard: &ShardRecord,
    query_acc: &mut TimingAccumulator,
    child_acc: &mut TimingAccumulator,
) -> ShardTotals {
    let mut totals = ShardTotals {
        fetch_nanos: shard.fetch.time_in_nanos,
        ..Default::default()
    };

    for query in shard.searches.iter().flat_map(|s| &s.query) {
        totals.query_nanos = totals.query_nanos.saturating_add(query.time_in_nanos);
        query_acc.add(&query.query_type, &query.description, query.time_in_nanos);

        for child in &query.children {
            child_acc.add(&child.query_type, &child.description, child.time_in_nanos);
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::timing_builder::TimingKey;
    use crate::parser::schema::{FetchRecord, QueryNode, SearchRecord};

    fn query(query_type: &str, description: &str, nanos: u64) -> QueryNode {
        QueryNode {
            query_type: query_type.to_string(),
            description: description.to_string(),
            time_in_nanos: nanos,
            children: Vec::new(),
        }
    }

    fn shard(index: &str, queries: Vec<QueryNode>, fetch: u64) -> ShardRecord {
        ShardRecord {
            index: index.to_string(),
            shard_id: "0".to_string(),
            searches: vec![SearchRecord { query: queries }],
            fetch: FetchRecord {
                time_in_nanos: fetch,
            },
        }
    }

    #[test]
    fn test_aggregate_empty_document() {
        let result = aggregate(&ProfileDocument::default());

        assert!(result.is_empty());
        assert_eq!(result.total_time_nanos, 0);
        assert!(result.query_timings.is_empty());
        assert!(result.child_timings.is_empty());
    }

    #[test]
    fn test_children_do_not_add_to_total() {
        let mut parent = query("BooleanQuery", "+a:1 +b:2", 5_000_000);
        parent.children = vec![
            query("TermQuery", "a:1", 2_000_000),
            query("TermQuery", "b:2", 3_000_000),
        ];

        let result = aggregate(&ProfileDocument {
            shards: vec![shard("idx", vec![parent], 0)],
        });

        assert_eq!(result.total_time_nanos, 5_000_000);
        assert_eq!(result.child_timings.len(), 2);
        assert_eq!(result.child_timings[0].key, TimingKey::new("TermQuery", "b"));
        assert_eq!(result.child_timings[0].time_in_nanos, 3_000_000);
        assert_eq!(result.query_timings[0].key.field, "+a");
    }

    #[test]
    fn test_shards_sorted_by_percentage() {
        let result = aggregate(&ProfileDocument {
            shards: vec![
                shard("small", vec![query("t", "f:1", 1_000_000)], 0),
                shard("big", vec![query("t", "f:1", 3_000_000)], 0),
            ],
        });

        assert_eq!(result.shards[0].index, "big");
        assert_eq!(result.shards[0].percentage, 75.0);
        assert_eq!(result.shards[1].percentage, 25.0);
        assert_eq!(result.query_timings[0].time_in_nanos, 4_000_000);
    }

    #[test]
    fn test_zero_total_gives_zero_percentages() {
        let result = aggregate(&ProfileDocument {
            shards: vec![shard("a", vec![], 0), shard("b", vec![], 0)],
        });

        assert_eq!(result.shards.len(), 2);
        assert!(result.shards.iter().all(|s| s.percentage == 0.0));
        assert_eq!(result.shards[0].index, "a");
    }
}
