//! Crash and coverage data sources.
//!
//! The aggregator never knows where a dataset came from. A [`DataSource`]
//! hands out one [`ProjectDataset`] per project name; which implementation
//! is used is decided once, from [`DataSourceKind`] in the run configuration.

pub mod file;
mod model;
pub mod synthetic;

pub use model::{
    date_format, format_date, parse_date, CoveragePoint, CrashRecord, ProjectDataset,
};

use std::path::PathBuf;

use crate::error::AnalysisError;

/// Provider of per-project crash and coverage records.
pub trait DataSource {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Load the dataset for `project`.
    ///
    /// # Errors
    /// Returns [`AnalysisError::UnknownProject`] when the source has nothing
    /// for this project.
    fn load(&self, project: &str) -> Result<ProjectDataset, AnalysisError>;
}

/// Which data source a run reads from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DataSourceKind {
    /// Built-in deterministic sample data.
    #[default]
    Synthetic,
    /// `<dir>/<project>.json` files holding exported datasets.
    Files(PathBuf),
}

impl DataSourceKind {
    /// Instantiate the configured source.
    pub fn build(&self) -> Box<dyn DataSource> {
        match self {
            DataSourceKind::Synthetic => Box::new(synthetic::SyntheticSource),
            DataSourceKind::Files(dir) => Box::new(file::FileSource::new(dir.clone())),
        }
    }
}
