use crate::chart::ChartConfig;
use crate::utils::config::DEFAULT_TOP_CHILDREN;
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Profile JSON to read (None or `-` = stdin)
    pub input: Option<PathBuf>,

    /// Number of child timing rows to render and report
    pub top_children: usize,

    /// Output path for JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for SVG shard chart (optional)
    pub output_svg: Option<PathBuf>,

    /// Chart configuration
    pub chart_config: Option<ChartConfig>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Print the JSON report to stdout instead of the text summary
    pub json_stdout: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: None,
            top_children: DEFAULT_TOP_CHILDREN,
            output_json: None,
            output_svg: None,
            chart_config: None,
            print_summary: true,
            json_stdout: false,
        }
    }
}

impl AnalyzeArgs {
    /// Whether the input comes from stdin
    pub fn reads_stdin(&self) -> bool {
        match &self.input {
            Some(path) => path.as_os_str() == "-",
            None => true,
        }
    }
}
