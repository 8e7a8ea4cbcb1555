//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Profile API timings are reported in nanoseconds, we display milliseconds
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Number of child timing rows rendered by default
pub const DEFAULT_TOP_CHILDREN: usize = 5;
pub const MAX_TOP_CHILDREN: usize = 1000;

// Fallbacks for keys missing from the profile document
pub const UNKNOWN_INDEX: &str = "Unknown Index";
pub const UNKNOWN_SHARD: &str = "Unknown Shard";
pub const UNKNOWN_QUERY_TYPE: &str = "Unknown Query Type";
pub const UNKNOWN_CHILD_TYPE: &str = "Unknown Type";
pub const NO_DESCRIPTION: &str = "No Description";
pub const UNKNOWN_FIELD: &str = "Unknown Field";

// Chart defaults
pub const DEFAULT_CHART_TITLE: &str = "Shard Total Times";
pub const DEFAULT_CHART_WIDTH: usize = 1200;
pub const MIN_CHART_WIDTH: usize = 400;
pub const MAX_CHART_WIDTH: usize = 10_000;

/// Source label used when the document is read from standard input
pub const STDIN_SOURCE: &str = "<stdin>";
