//! ossfuzz-analysis: coverage and crash trends for OSS-Fuzz projects.
//!
//! For each requested project the tool fetches the project's directory
//! listing from the OSS-Fuzz repository, loads crash and coverage records
//! from a data source, aggregates them, and finally writes a coverage chart
//! and a JSON report.
//!
//! # Modules
//!
//! - [`data`]: Crash/coverage records and the data sources that provide them
//! - [`metadata`]: Project metadata from the GitHub contents API
//! - [`analysis`]: Aggregation into per-project metrics
//! - [`report`]: The combined report and its JSON form
//! - [`chart`]: PNG rendering of coverage trends
//! - [`pipeline`]: Run configuration and orchestration
//! - [`error`]: Error types

pub mod analysis;
pub mod chart;
pub mod data;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod report;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub use error::AnalysisError;
pub use pipeline::{run_pipeline, RunConfig, RunSummary};

use data::DataSourceKind;
use metadata::MetadataMode;

/// The ossfuzz-analysis CLI application.
#[derive(Parser, Debug)]
#[command(name = "ossfuzz-analysis")]
#[command(version, about)]
struct Cli {
    /// OSS-Fuzz projects to analyze, in order [default: zlib libpng openssl].
    #[arg(long, num_args = 1.., value_name = "NAME")]
    projects: Vec<String>,

    /// Directory that receives the chart and the JSON report [default: outputs].
    #[arg(long, value_name = "PATH")]
    output_dir: Option<PathBuf>,

    /// Read datasets from <DIR>/<project>.json instead of the built-in samples.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Do not contact GitHub; record placeholder metadata instead.
    #[arg(long)]
    offline: bool,

    /// Base URL of the GitHub REST API.
    #[arg(
        long,
        value_name = "URL",
        env = "OSSFUZZ_API_BASE",
        default_value = metadata::github::DEFAULT_API_BASE
    )]
    api_base: String,

    /// Timeout for each metadata request, in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// TrueType/OpenType font used for chart text.
    #[arg(long, value_name = "PATH")]
    chart_font: Option<PathBuf>,

    /// Log progress to stderr (RUST_LOG overrides).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> RunConfig {
        let defaults = RunConfig::default();

        let metadata = if self.offline {
            MetadataMode::Offline
        } else {
            MetadataMode::Github {
                api_base: self.api_base,
                timeout: Duration::from_secs(self.timeout_secs),
            }
        };

        RunConfig {
            projects: if self.projects.is_empty() {
                defaults.projects
            } else {
                self.projects
            },
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            data_source: self
                .data_dir
                .map_or(DataSourceKind::Synthetic, DataSourceKind::Files),
            metadata,
            chart: chart::ChartOptions {
                font_path: self.chart_font,
                ..defaults.chart
            },
        }
    }
}

/// Run the ossfuzz-analysis CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), AnalysisError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.into_config();
    let summary = run_pipeline(&config)?;
    print!("{}", summary);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
