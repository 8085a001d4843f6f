use std::path::PathBuf;
use thiserror::Error;

/// The main error type for analysis runs.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to retrieve metadata for '{project}': {message}")]
    Retrieval { project: String, message: String },

    #[error("Unknown project '{project}': {message}")]
    UnknownProject { project: String, message: String },

    #[error("No coverage points for '{project}': cannot aggregate an empty dataset")]
    EmptyDataset { project: String },

    #[error("Invalid data for '{project}': {message}")]
    InvalidData { project: String, message: String },

    #[error("Failed to parse dataset file {path}: {source}")]
    DataFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse report JSON from {path}: {source}")]
    ReportParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("Failed to render chart {path}: {message}")]
    Render { path: PathBuf, message: String },

    #[error("No projects were processed successfully ({} skipped)", .failures.len())]
    NoProjectsProcessed { failures: Vec<(String, String)> },
}

impl AnalysisError {
    /// Whether this error only affects a single project entry.
    ///
    /// Project-level errors are tolerated by the pipeline; everything else
    /// aborts the run.
    pub fn is_project_level(&self) -> bool {
        matches!(
            self,
            AnalysisError::Retrieval { .. }
                | AnalysisError::UnknownProject { .. }
                | AnalysisError::EmptyDataset { .. }
                | AnalysisError::InvalidData { .. }
                | AnalysisError::DataFile { .. }
        )
    }
}
