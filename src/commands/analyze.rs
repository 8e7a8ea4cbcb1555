//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads and parses the profile document
//! 2. Aggregates shard, query and child timings
//! 3. Generates the shard chart (if requested)
//! 4. Writes output files
//! 5. Prints the summary

use crate::aggregator::{aggregate, calculate_shard_distribution, ProfileAggregate};
use crate::chart::{generate_shard_chart, generate_text_summary};
use crate::commands::models::AnalyzeArgs;
use crate::output::{report_to_string, to_report, write_report, write_svg};
use crate::parser::load_profile;
use crate::utils::config::{MAX_CHART_WIDTH, MAX_TOP_CHILDREN, MIN_CHART_WIDTH, STDIN_SOURCE};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Analyze command arguments
///
/// # Returns
/// The aggregate that was rendered, or Err with context if any step fails
///
/// # Errors
/// * Unreadable input
/// * Input that is not JSON, or holds a key of the wrong type
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<ProfileAggregate> {
    let start_time = Instant::now();
    let source = source_label(&args);

    info!("Analyzing profile: {}", source);

    let document = load_profile(args.input.as_deref())
        .with_context(|| format!("Failed to load profile from {}", source))?;

    let stats = document.stats();
    debug!(
        "Document: {} shards, {} searches, {} queries, {} children",
        stats.shards, stats.searches, stats.queries, stats.children
    );

    let result = aggregate(&document);

    if result.is_empty() {
        warn!("Profile contains no shards (is \"profile\": true set on the search request?)");
    } else {
        let dist = calculate_shard_distribution(&result.shards);
        info!("Shard distribution: {}", dist.summary());
        if dist.is_skewed() {
            warn!(
                "One shard accounts for {:.1}% of the total time",
                dist.slowest_share
            );
        }
    }

    let svg_content = match &args.output_svg {
        Some(_) if result.is_empty() => {
            warn!("Skipping shard chart: no shard data");
            None
        }
        Some(_) => {
            info!("Generating shard chart...");
            Some(
                generate_shard_chart(&result.shards, args.chart_config.as_ref())
                    .context("Failed to generate shard chart")?,
            )
        }
        None => None,
    };

    write_outputs(&args, &result, &source, svg_content)?;

    if args.json_stdout {
        let report = to_report(&result, &source, args.top_children);
        println!("{}", report_to_string(&report)?);
    } else if args.print_summary {
        println!("{}", generate_text_summary(&result, args.top_children));
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(result)
}

/// Write output files (JSON report and optional SVG chart).
///
/// **Private** - internal helper for execute_analyze
fn write_outputs(
    args: &AnalyzeArgs,
    result: &ProfileAggregate,
    source: &str,
    svg_content: Option<String>,
) -> Result<()> {
    if let Some(json_path) = &args.output_json {
        let report = to_report(result, source, args.top_children);
        write_report(&report, json_path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", json_path.display());
    }

    if let (Some(svg), Some(svg_path)) = (svg_content, &args.output_svg) {
        write_svg(&svg, svg_path).context("Failed to write shard chart SVG")?;
        info!("✓ Shard chart written to: {}", svg_path.display());
    }

    Ok(())
}

/// Human-readable name of the input
///
/// **Private** - internal utility
fn source_label(args: &AnalyzeArgs) -> String {
    match &args.input {
        Some(path) if !args.reads_stdin() => path.display().to_string(),
        _ => STDIN_SOURCE.to_string(),
    }
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if !args.reads_stdin() {
        if let Some(path) = &args.input {
            if !path.exists() {
                anyhow::bail!("Input file does not exist: {}", path.display());
            }
            if path.is_dir() {
                anyhow::bail!("Input path is a directory: {}", path.display());
            }
        }
    }

    if args.top_children == 0 {
        anyhow::bail!("top_children must be greater than 0");
    }

    if args.top_children > MAX_TOP_CHILDREN {
        anyhow::bail!("top_children is too large (max {})", MAX_TOP_CHILDREN);
    }

    if let Some(config) = &args.chart_config {
        if config.width < MIN_CHART_WIDTH || config.width > MAX_CHART_WIDTH {
            anyhow::bail!(
                "Chart width must be between {} and {} pixels",
                MIN_CHART_WIDTH,
                MAX_CHART_WIDTH
            );
        }
    }

    Ok(())
}
