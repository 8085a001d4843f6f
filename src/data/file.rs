//! Datasets exported to JSON files, one per project.
//!
//! Each file holds `{"crashes": [...], "coverage": [...]}`, the same shape as
//! a `raw_data` entry in the analysis report, so a previous report can be
//! split back into inputs.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use super::{DataSource, ProjectDataset};
use crate::error::AnalysisError;

/// Reads `<dir>/<project>.json`.
#[derive(Clone, Debug)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the dataset for `project` is read from.
    pub fn path_for(&self, project: &str) -> PathBuf {
        self.dir.join(format!("{project}.json"))
    }
}

impl DataSource for FileSource {
    fn name(&self) -> &'static str {
        "files"
    }

    fn load(&self, project: &str) -> Result<ProjectDataset, AnalysisError> {
        if !is_plain_name(project) {
            return Err(AnalysisError::UnknownProject {
                project: project.to_string(),
                message: "project names must not contain path components".to_string(),
            });
        }

        let path = self.path_for(project);
        let file = File::open(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => AnalysisError::UnknownProject {
                project: project.to_string(),
                message: format!("no dataset file at {}", path.display()),
            },
            _ => AnalysisError::InvalidData {
                project: project.to_string(),
                message: format!("cannot read {}: {}", path.display(), source),
            },
        })?;

        read_dataset(BufReader::new(file), &path)
    }
}

fn read_dataset<R: io::Read>(reader: R, path: &Path) -> Result<ProjectDataset, AnalysisError> {
    serde_json::from_reader(reader).map_err(|source| AnalysisError::DataFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a dataset from raw bytes.
///
/// Useful for fuzzing and for tests without file I/O.
pub fn from_json_slice(bytes: &[u8]) -> Result<ProjectDataset, serde_json::Error> {
    serde_json::from_slice(bytes)
}

fn is_plain_name(project: &str) -> bool {
    !project.is_empty()
        && project != "."
        && project != ".."
        && !project.contains(['/', '\\'])
}
