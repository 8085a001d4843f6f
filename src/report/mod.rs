//! The combined analysis report and its JSON form.
//!
//! A [`Report`] holds three mappings keyed by project name: the fetched
//! metadata, the aggregated analysis and the raw data it was computed from.
//! The three always share the same keys in the same order.

mod project_map;

pub use project_map::ProjectMap;

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::ProjectAnalysis;
use crate::data::ProjectDataset;
use crate::error::AnalysisError;
use crate::metadata::ProjectMetadata;

/// File name of the JSON report inside the output directory.
pub const REPORT_FILE_NAME: &str = "oss_fuzz_analysis.json";

/// Everything produced by one run, keyed by project.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ProjectMap<ProjectMetadata>,
    pub analysis: ProjectMap<ProjectAnalysis>,
    pub raw_data: ProjectMap<ProjectDataset>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one project's results in all three sections.
    pub fn insert(
        &mut self,
        project: &str,
        metadata: ProjectMetadata,
        analysis: ProjectAnalysis,
        raw_data: ProjectDataset,
    ) {
        self.metadata.insert(project, metadata);
        self.analysis.insert(project, analysis);
        self.raw_data.insert(project, raw_data);
    }

    /// Project names in insertion order.
    pub fn project_names(&self) -> impl Iterator<Item = &str> {
        self.analysis.keys()
    }

    pub fn len(&self) -> usize {
        self.analysis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analysis.is_empty()
    }

    /// Returns true if all three sections have identical keys in identical order.
    ///
    /// Reports built through [`Report::insert`] always are; this guards reports
    /// read back from disk.
    pub fn is_consistent(&self) -> bool {
        self.metadata.keys().eq(self.analysis.keys())
            && self.analysis.keys().eq(self.raw_data.keys())
    }
}

/// Reads a report from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_report(path: &Path) -> Result<Report, AnalysisError> {
    let file = File::open(path).map_err(AnalysisError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| AnalysisError::ReportParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a report as pretty-printed JSON.
///
/// The document is rendered in memory, written to a temporary file next to
/// `path` and then renamed over it, so readers never observe a partial file.
///
/// # Errors
/// Returns [`AnalysisError::Write`] if serialization or any file operation
/// fails.
pub fn write_report(path: &Path, report: &Report) -> Result<(), AnalysisError> {
    let write_error = |message: String| AnalysisError::Write {
        path: path.to_path_buf(),
        message,
    };

    let mut json = to_json_string(report).map_err(|source| write_error(source.to_string()))?;
    json.push('\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".oss_fuzz_analysis")
        .suffix(".json.tmp")
        .tempfile_in(dir)
        .map_err(|source| write_error(source.to_string()))?;
    tmp.write_all(json.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|source| write_error(source.to_string()))?;
    tmp.persist(path)
        .map_err(|source| write_error(source.error.to_string()))?;

    log::info!("Wrote report for {} project(s) to {}", report.len(), path.display());
    Ok(())
}

/// Reads a report from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<Report, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a report from raw bytes.
///
/// Useful for fuzzing and processing raw bytes without UTF-8 validation.
pub fn from_json_slice(bytes: &[u8]) -> Result<Report, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a report to a pretty-printed JSON string.
pub fn to_json_string(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
