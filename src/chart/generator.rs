//! SVG bar chart of shard total times.
//!
//! One horizontal bar per shard, in the order given (the aggregator ranks
//! shards slowest first). Bar length is relative to the slowest shard.

use crate::aggregator::ShardSummary;
use crate::utils::config::{DEFAULT_CHART_TITLE, DEFAULT_CHART_WIDTH};
use crate::utils::error::ChartError;
use log::info;

const BAR_HEIGHT: usize = 22;
const BAR_GAP: usize = 6;
const TITLE_HEIGHT: usize = 40;
const AXIS_HEIGHT: usize = 50;
const CHAR_WIDTH: f64 = 7.0;
const VALUE_LABEL_WIDTH: f64 = 90.0;
const TICK_COUNT: usize = 5;
const BAR_COLOR: &str = "rgb(135, 206, 235)"; // Sky Blue

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_CHART_TITLE.to_string(),
            width: DEFAULT_CHART_WIDTH,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Generate an SVG bar chart from shard summaries
pub fn generate_shard_chart(
    shards: &[ShardSummary],
    config: Option<&ChartConfig>,
) -> Result<String, ChartError> {
    if shards.is_empty() {
        return Err(ChartError::EmptyShards);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating shard chart with {} bars", shards.len());

    let labels: Vec<String> = shards.iter().map(shard_label).collect();
    let width = config.width as f64;

    // Label column grows with the longest label, up to a third of the chart
    let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let label_width = (longest as f64 * CHAR_WIDTH + 20.0).clamp(80.0, (width / 3.0).max(80.0));
    let plot_width = (width - label_width - VALUE_LABEL_WIDTH).max(1.0);

    let plot_height = shards.len() * (BAR_HEIGHT + BAR_GAP);
    let total_height = TITLE_HEIGHT + plot_height + AXIS_HEIGHT;

    let max_time = shards
        .iter()
        .map(|s| s.total_time_ms)
        .fold(0.0_f64, f64::max);

    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, total_height, config.width, total_height
    ));
    svg.push_str(r#"<style>.bar:hover { stroke: black; stroke-width: 1; opacity: 0.9; }</style>"#);
    svg.push_str(&format!(
        r#"<text x="{}" y="24" font-size="16" text-anchor="middle" font-weight="bold" font-family="sans-serif">{}</text>"#,
        config.width / 2,
        escape_xml(&config.title)
    ));

    for (i, (shard, label)) in shards.iter().zip(&labels).enumerate() {
        let y = TITLE_HEIGHT + i * (BAR_HEIGHT + BAR_GAP);
        let bar_width = scale(shard.total_time_ms, max_time, plot_width);
        render_bar(&mut svg, shard, label, label_width, y as f64, bar_width);
    }

    render_axis(
        &mut svg,
        label_width,
        plot_width,
        (TITLE_HEIGHT + plot_height) as f64,
        max_time,
    );

    svg.push_str("</svg>");

    info!("Shard chart generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// `index - shard_id` label for a shard bar
pub fn shard_label(shard: &ShardSummary) -> String {
    format!("{} - {}", shard.index, shard.shard_id)
}

fn scale(value: f64, max: f64, extent: f64) -> f64 {
    if max > 0.0 {
        (value / max) * extent
    } else {
        0.0
    }
}

fn render_bar(out: &mut String, shard: &ShardSummary, label: &str, x: f64, y: f64, w: f64) {
    let text_y = y + BAR_HEIGHT as f64 / 2.0 + 4.0;

    out.push_str(&format!(
        r#"<text x="{:.2}" y="{:.2}" font-size="12" text-anchor="end" font-family="sans-serif">{}</text>"#,
        x - 8.0,
        text_y,
        escape_xml(label)
    ));
    out.push_str(&format!(
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{}" fill="{}" class="bar">"#,
        x, y, w, BAR_HEIGHT, BAR_COLOR
    ));
    out.push_str(&format!(
        r#"<title>{}: {:.2} ms ({:.1}%)</title></rect>"#,
        escape_xml(label),
        shard.total_time_ms,
        shard.percentage
    ));
    out.push_str(&format!(
        r#"<text x="{:.2}" y="{:.2}" font-size="11" font-family="sans-serif">{:.2} ms</text>"#,
        x + w + 6.0,
        text_y,
        shard.total_time_ms
    ));
}

fn render_axis(out: &mut String, x: f64, plot_width: f64, y: f64, max_time: f64) {
    out.push_str(&format!(
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black"/>"#,
        x,
        y,
        x + plot_width,
        y
    ));

    for tick in 0..=TICK_COUNT {
        let fraction = tick as f64 / TICK_COUNT as f64;
        let tick_x = x + fraction * plot_width;
        out.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black"/>"#,
            tick_x,
            y,
            tick_x,
            y + 5.0
        ));
        out.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="10" text-anchor="middle" font-family="sans-serif">{:.2}</text>"#,
            tick_x,
            y + 18.0,
            fraction * max_time
        ));
    }

    out.push_str(&format!(
        r#"<text x="{:.2}" y="{:.2}" font-size="12" text-anchor="middle" font-family="sans-serif">Time (ms)</text>"#,
        x + plot_width / 2.0,
        y + 40.0
    ));
}

/// Escape text for SVG content and attributes
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
