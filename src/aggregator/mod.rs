//! Aggregation of profile documents into timing breakdowns.
//!
//! This module transforms a parsed profile document into:
//! - Ranked per-shard summaries with percentages
//! - Query time grouped by query type and field
//! - Child operation time grouped by type and field
//! - Shard time distribution statistics

pub mod metrics;
pub mod profile_aggregator;
pub mod timing_builder;

// Re-export main types and functions
pub use metrics::{calculate_shard_distribution, nanos_to_millis, ShardDistribution};
pub use profile_aggregator::{aggregate, ProfileAggregate, ShardSummary};
pub use timing_builder::{extract_field_name, TimingAccumulator, TimingEntry, TimingKey};
