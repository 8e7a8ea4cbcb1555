//! Presentation of aggregated timings.
//!
//! This module renders a `ProfileAggregate` for people:
//! - SVG bar chart of shard total times
//! - Terminal summary with banner, tables and an ASCII chart

pub mod generator;
pub mod text;

// Re-export main types
pub use generator::{generate_shard_chart, ChartConfig};
pub use text::{generate_text_summary, total_time_banner};
