use crate::parser::load_profile;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a profile JSON file without aggregating it
pub fn validate_profile_file(file_path: PathBuf) -> Result<()> {
    println!("Validating profile: {}", file_path.display());

    let document = load_profile(Some(file_path.as_path()))
        .with_context(|| format!("Profile is not usable: {}", file_path.display()))?;
    let stats = document.stats();

    println!("✓ Valid profile JSON");
    println!("  Shards: {}", stats.shards);
    println!("  Searches: {}", stats.searches);
    println!("  Queries: {}", stats.queries);
    println!("  Children: {}", stats.children);

    Ok(())
}

/// Display report schema information
pub fn display_schema(show_details: bool) {
    println!("ES Profile Analyzer Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  source: string           - Input file or <stdin>");
        println!("  generated_at: string     - ISO 8601 timestamp");
        println!("  total_time_ms: number    - Query + fetch time over all shards");
        println!("  shards: array            - Shards, slowest first");
        println!("    index: string          - Index name");
        println!("    shard_id: string       - Shard identifier");
        println!("    total_time_ms: number  - Query + fetch time");
        println!("    query_time_ms: number  - Top-level query time");
        println!("    fetch_time_ms: number  - Fetch phase time");
        println!("    percentage: number     - Share of total_time_ms");
        println!("  query_timings: array     - Query time by type and field");
        println!("    type: string           - Query type");
        println!("    field: string          - Text before ':' in the description");
        println!("    time_ms: number        - Accumulated time");
        println!("  child_timings: array     - Top child operations (same shape)");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("ES Profile Analyzer v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Timing breakdowns for Elasticsearch Profile API output.");
}
