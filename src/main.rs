//! ES Profile Analyzer CLI
//!
//! Reads the output of the Elasticsearch Profile API and prints
//! aggregated timing breakdowns per shard, query and child operation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use es_profile_analyzer::chart::ChartConfig;
use es_profile_analyzer::commands::{
    display_schema, display_version, execute_analyze, validate_args, validate_profile_file,
    AnalyzeArgs,
};
use es_profile_analyzer::utils::config::{
    DEFAULT_CHART_TITLE, DEFAULT_CHART_WIDTH, DEFAULT_TOP_CHILDREN,
};

/// ES Profile Analyzer - timing breakdowns for Elasticsearch Profile API output
#[derive(Parser, Debug)]
#[command(name = "es-profile")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a profile document
    Analyze {
        /// Profile JSON file (reads stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Number of child timing rows to show
        #[arg(long, env = "ES_PROFILE_TOP_CHILDREN", default_value_t = DEFAULT_TOP_CHILDREN)]
        top_children: usize,

        /// Output path for JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for SVG shard chart
        #[arg(short, long)]
        chart: Option<PathBuf>,

        /// Chart title
        #[arg(long, default_value = DEFAULT_CHART_TITLE)]
        chart_title: String,

        /// Chart width in pixels
        #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
        chart_width: usize,

        /// Print the JSON report to stdout instead of the text summary
        #[arg(long)]
        json: bool,

        /// Do not print the text summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Check that a profile document can be read
    Validate {
        /// Path to profile JSON file
        file: PathBuf,
    },

    /// Display report schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            top_children,
            output,
            chart,
            chart_title,
            chart_width,
            json,
            quiet,
        } => {
            let chart_config = chart.as_ref().map(|_| {
                ChartConfig::new()
                    .with_title(chart_title)
                    .with_width(chart_width)
            });

            let args = AnalyzeArgs {
                input,
                top_children,
                output_json: output,
                output_svg: chart,
                chart_config,
                print_summary: !quiet,
                json_stdout: json,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_profile_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
