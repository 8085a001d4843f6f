//! Run orchestration.
//!
//! Processes each requested project in input order (metadata, data,
//! aggregation), then renders the chart and writes the report. A project that
//! fails is logged and skipped; the run only fails when nothing succeeded or
//! an output cannot be written.

mod summary;

pub use summary::{ProjectSummary, RunSummary, SkippedProject};

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::analysis::{analyze_project, CoverageTrendPoint};
use crate::chart::{render_coverage_chart, ChartOptions, CHART_FILE_NAME};
use crate::data::{DataSource, DataSourceKind};
use crate::error::AnalysisError;
use crate::metadata::{MetadataFetcher, MetadataMode, ProjectMetadata};
use crate::report::{write_report, Report, REPORT_FILE_NAME};

/// Projects analyzed when none are requested.
pub const DEFAULT_PROJECTS: &[&str] = &["zlib", "libpng", "openssl"];

/// Output directory used when none is requested.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Everything a run needs to know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Project names, processed in this order.
    pub projects: Vec<String>,
    /// Directory receiving the chart and the report.
    pub output_dir: PathBuf,
    /// Where crash and coverage data come from.
    pub data_source: DataSourceKind,
    /// How project metadata is obtained.
    pub metadata: MetadataMode,
    pub chart: ChartOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            projects: DEFAULT_PROJECTS.iter().map(|p| p.to_string()).collect(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            data_source: DataSourceKind::default(),
            metadata: MetadataMode::default(),
            chart: ChartOptions::default(),
        }
    }
}

impl RunConfig {
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(CHART_FILE_NAME)
    }
}

/// Per-project results gathered before any output is written.
#[derive(Clone, Debug, Default)]
pub struct Collected {
    pub report: Report,
    pub processed: Vec<ProjectSummary>,
    pub skipped: Vec<SkippedProject>,
}

/// Run the pipeline with the fetcher and data source named in `config`.
pub fn run_pipeline(config: &RunConfig) -> Result<RunSummary, AnalysisError> {
    let fetcher = config.metadata.build();
    let source = config.data_source.build();
    run_with(config, fetcher.as_ref(), source.as_ref())
}

/// Run the pipeline with explicit collaborators.
///
/// # Errors
/// Returns [`AnalysisError::NoProjectsProcessed`] if every project was
/// skipped, or the first output error. The report is still written when only
/// the chart fails.
pub fn run_with(
    config: &RunConfig,
    fetcher: &dyn MetadataFetcher,
    source: &dyn DataSource,
) -> Result<RunSummary, AnalysisError> {
    log::info!(
        "Analyzing {} project(s) using the {} data source",
        config.projects.len(),
        source.name()
    );

    let collected = collect_report(&config.projects, fetcher, source)?;
    if collected.report.is_empty() {
        return Err(AnalysisError::NoProjectsProcessed {
            failures: collected
                .skipped
                .into_iter()
                .map(|s| (s.project, s.reason))
                .collect(),
        });
    }

    fs::create_dir_all(&config.output_dir).map_err(|source| AnalysisError::Write {
        path: config.output_dir.clone(),
        message: source.to_string(),
    })?;

    let chart_path = config.chart_path();
    let report_path = config.report_path();

    let series: Vec<(&str, &[CoverageTrendPoint])> = collected
        .report
        .analysis
        .iter()
        .map(|(project, analysis)| (project, analysis.coverage_trend.as_slice()))
        .collect();
    let chart = render_coverage_chart(&chart_path, &series, &config.chart);
    if let Err(err) = &chart {
        log::error!("{err}");
    }

    write_report(&report_path, &collected.report)?;
    let chart = chart?;

    for skipped in &collected.skipped {
        log::warn!("'{}' was not included: {}", skipped.project, skipped.reason);
    }

    Ok(RunSummary {
        projects: collected.processed,
        skipped: collected.skipped,
        report_path,
        chart_path,
        chart_labelled: chart.labelled,
    })
}

/// Fetch, load and aggregate every project, in order, without writing output.
///
/// Repeated names are processed once. Only errors that are not tied to a
/// single project are returned; everything else ends up in
/// [`Collected::skipped`].
pub fn collect_report(
    projects: &[String],
    fetcher: &dyn MetadataFetcher,
    source: &dyn DataSource,
) -> Result<Collected, AnalysisError> {
    let mut collected = Collected::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for project in projects {
        let project = project.as_str();
        if !seen.insert(project) {
            log::warn!("'{}' requested more than once; processing it once", project);
            continue;
        }

        log::info!("Processing '{}'", project);

        let metadata = match fetcher.fetch(project) {
            Ok(metadata) => metadata,
            Err(err) => {
                log::warn!("{err}; continuing without metadata");
                ProjectMetadata::unavailable(project, err.to_string())
            }
        };

        let outcome = source.load(project).and_then(|dataset| {
            let analysis = analyze_project(project, &dataset)?;
            Ok((dataset, analysis))
        });

        let (dataset, analysis) = match outcome {
            Ok(result) => result,
            Err(err) if err.is_project_level() => {
                log::warn!("Skipping '{}': {}", project, err);
                collected.skipped.push(SkippedProject {
                    project: project.to_string(),
                    reason: err.to_string(),
                });
                continue;
            }
            Err(err) => return Err(err),
        };

        collected.processed.push(ProjectSummary {
            project: project.to_string(),
            unique_crashes: analysis.unique_crashes,
            avg_coverage: analysis.avg_coverage,
            metadata_available: metadata.is_available(),
        });
        collected.report.insert(project, metadata, analysis, dataset);
    }

    Ok(collected)
}
