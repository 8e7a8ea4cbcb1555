//! Unit conversion and distribution statistics for shard timings.

use super::profile_aggregator::ShardSummary;
use crate::utils::config::NANOS_PER_MILLI;

/// Convert nanoseconds to milliseconds
pub fn nanos_to_millis(nanos: u64) -> f64 {
    nanos as f64 / NANOS_PER_MILLI
}

/// Share of `whole` taken by `part`, in percent. Zero when `whole` is zero.
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole) * 100.0
    } else {
        0.0
    }
}

/// Calculate shard time distribution statistics
///
/// **Public** - provides summary statistics
///
/// # Arguments
/// * `shards` - Shard summaries from the aggregator
///
/// # Returns
/// Statistics about how time is spread across shards
pub fn calculate_shard_distribution(shards: &[ShardSummary]) -> ShardDistribution {
    if shards.is_empty() {
        return ShardDistribution::default();
    }

    let count = shards.len();
    let total: f64 = shards.iter().map(|s| s.total_time_ms).sum();

    let mut times: Vec<f64> = shards.iter().map(|s| s.total_time_ms).collect();
    times.sort_by(|a, b| a.total_cmp(b));
    let median = if count % 2 == 0 {
        (times[count / 2 - 1] + times[count / 2]) / 2.0
    } else {
        times[count / 2]
    };

    let slowest_share = shards
        .iter()
        .map(|s| s.percentage)
        .fold(0.0_f64, f64::max);

    ShardDistribution {
        shard_count: count,
        total_time_ms: total,
        mean_time_ms: total / count as f64,
        median_time_ms: median,
        slowest_share,
    }
}

/// Shard time distribution statistics
///
/// **Public** - returned from calculate_shard_distribution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShardDistribution {
    /// Number of shards
    pub shard_count: usize,

    /// Sum of shard totals
    pub total_time_ms: f64,

    /// Mean shard total
    pub mean_time_ms: f64,

    /// Median shard total
    pub median_time_ms: f64,

    /// Percentage of the overall time spent in the slowest shard
    pub slowest_share: f64,
}

impl ShardDistribution {
    /// Returns true if one shard accounts for more than half of the time
    /// while other shards exist
    pub fn is_skewed(&self) -> bool {
        self.shard_count > 1 && self.slowest_share > 50.0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and the terminal footer
    pub fn summary(&self) -> String {
        format!(
            "Shards: {} | Total: {:.2} ms | Mean: {:.2} ms | Median: {:.2} ms | Slowest: {:.1}%",
            self.shard_count,
            self.total_time_ms,
            self.mean_time_ms,
            self.median_time_ms,
            self.slowest_share
        )
    }
}
