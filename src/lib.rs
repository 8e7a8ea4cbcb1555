//! ES Profile Analyzer
//!
//! Aggregated timing breakdowns for Elasticsearch Profile API output:
//! per shard, per query type and field, and per child operation.
//!
//! This crate provides the core implementation for the
//! `es-profile` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! curl -s 'localhost:9200/my-index/_search' -H 'Content-Type: application/json' \
//!   -d '{"profile": true, "query": {"term": {"status": "active"}}}' > profile.json
//! es-profile analyze profile.json --chart shards.svg
//! ```
//!
//! ## Library use
//!
//! ```
//! use es_profile_analyzer::aggregator::aggregate;
//! use es_profile_analyzer::parser::parse_profile;
//!
//! let document = parse_profile(r#"{"profile": {"shards": []}}"#).unwrap();
//! let result = aggregate(&document);
//! assert_eq!(result.total_time_nanos, 0);
//! ```

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
