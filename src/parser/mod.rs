//! Profile document parsing and input schema.
//!
//! This module handles:
//! - Reading raw JSON from a file or stdin
//! - Defaulting absent keys
//! - Classifying malformed input vs. unexpected structure

pub mod es_profile;
pub mod schema;

// Re-export main types
pub use es_profile::{load_profile, parse_document, parse_profile, read_input};
pub use schema::{DocumentStats, FetchRecord, ProfileDocument, QueryNode, SearchRecord, ShardRecord};
