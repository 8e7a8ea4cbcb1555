//! Terminal rendering of an aggregate: banner, tables and an ASCII chart.

use super::generator::shard_label;
use crate::aggregator::{calculate_shard_distribution, ProfileAggregate, ShardSummary, TimingEntry};
use colored::Colorize;

const SUMMARY_WIDTH: usize = 86;
const LABEL_WIDTH: usize = 50;
const BAR_MAX: usize = 40;

/// Create the full text summary for an aggregate
///
/// Query timings are listed in full; child timings are cut to
/// `top_children` rows.
pub fn generate_text_summary(aggregate: &ProfileAggregate, top_children: usize) -> String {
    let mut lines = Vec::new();

    lines.extend(render_banner(aggregate.total_time_ms()));
    lines.push(String::new());

    lines.extend(render_shard_table(&aggregate.shards));
    lines.push(String::new());
    lines.extend(render_ascii_chart(&aggregate.shards));
    lines.push(String::new());

    lines.extend(render_timing_table(
        "Query Times",
        "Query Type and Field",
        &aggregate.query_timings,
    ));
    lines.push(String::new());

    let shown = aggregate.child_timings.len().min(top_children);
    lines.extend(render_timing_table(
        &format!("Top {} Children Types by Time", top_children),
        "Children Type and Field",
        &aggregate.child_timings[..shown],
    ));

    if aggregate.child_timings.len() > shown {
        lines.push(format!(
            "   (Showing top {} of {} child timings)",
            shown,
            aggregate.child_timings.len()
        ));
    }

    if !aggregate.is_empty() {
        lines.push(String::new());
        let dist = calculate_shard_distribution(&aggregate.shards);
        lines.push(format!("  {}", dist.summary()));
    }

    lines.join("\n")
}

/// Banner line with the grand total, two decimals
pub fn total_time_banner(total_time_ms: f64) -> String {
    format!("Total Query Time: {:.2} ms", total_time_ms)
}

fn render_banner(total_time_ms: f64) -> Vec<String> {
    let rule = "━".repeat(SUMMARY_WIDTH);
    let banner = format!("{:^width$}", total_time_banner(total_time_ms), width = SUMMARY_WIDTH);

    vec![
        rule.clone(),
        banner.red().bold().to_string(),
        rule,
    ]
}

fn render_shard_table(shards: &[ShardSummary]) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("  {}", "Shard Times".bold()));
    lines.push(format!(
        "  {:<30} {:>12} {:>12} {:>12} {:>8}",
        "Index - Shard", "Total (ms)", "Query (ms)", "Fetch (ms)", "%"
    ));
    lines.push(format!("  {}", "─".repeat(78)));

    if shards.is_empty() {
        lines.push("  (no shards in profile)".to_string());
    }

    for shard in shards {
        lines.push(format!(
            "  {:<30} {:>12.3} {:>12.3} {:>12.3} {:>7.1}%",
            truncate(&shard_label(shard), 30),
            shard.total_time_ms,
            shard.query_time_ms,
            shard.fetch_time_ms,
            shard.percentage
        ));
    }

    lines
}

fn render_ascii_chart(shards: &[ShardSummary]) -> Vec<String> {
    let mut lines = vec![format!("  {}", "Shard Total Times".bold())];

    let max_time = shards
        .iter()
        .map(|s| s.total_time_ms)
        .fold(0.0_f64, f64::max);

    for shard in shards {
        let bar_width = if max_time > 0.0 {
            ((shard.total_time_ms / max_time) * BAR_MAX as f64).round() as usize
        } else {
            0
        };

        lines.push(format!(
            "  {:<24} {:<width$} {:.2} ms",
            truncate(&shard_label(shard), 24),
            "█".repeat(bar_width).cyan(),
            shard.total_time_ms,
            width = BAR_MAX
        ));
    }

    lines
}

fn render_timing_table(title: &str, label_header: &str, entries: &[TimingEntry]) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("  {}", title.bold()));
    lines.push(format!(
        "  {:<width$} {:>14}",
        label_header,
        "Time (ms)",
        width = LABEL_WIDTH
    ));
    lines.push(format!("  {}", "─".repeat(LABEL_WIDTH + 15)));

    if entries.is_empty() {
        lines.push("  (none)".to_string());
    }

    for entry in entries {
        lines.push(format!(
            "  {:<width$} {:>14.3}",
            truncate(&entry.key.label(), LABEL_WIDTH),
            entry.time_ms(),
            width = LABEL_WIDTH
        ));
    }

    lines
}

/// Truncate to `max_chars` characters with a trailing ellipsis
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}
