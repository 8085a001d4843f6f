//! Project metadata from the OSS-Fuzz repository.
//!
//! Remote concerns (endpoint construction, HTTP, listing parsing) live in
//! [`github`]. This module owns the record type and the fetcher seam the
//! pipeline talks to.

pub mod github;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

pub use github::GithubFetcher;

/// Repository path of a project's build files.
pub fn project_path(project: &str) -> String {
    format!("projects/{project}")
}

/// Browsable location of a project's build files.
pub fn source_url(project: &str) -> String {
    format!("https://github.com/google/oss-fuzz/tree/master/projects/{project}")
}

/// Minimal description of an OSS-Fuzz project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub path: String,
    /// File names in the project directory, in listing order.
    #[serde(default)]
    pub files: Vec<String>,
    pub source_url: String,
    /// Why the listing could not be retrieved, for placeholder records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProjectMetadata {
    /// A placeholder used when the listing is not available.
    pub fn unavailable(project: &str, reason: impl Into<String>) -> Self {
        Self {
            name: project.to_string(),
            path: project_path(project),
            files: Vec::new(),
            source_url: source_url(project),
            error: Some(reason.into()),
        }
    }

    /// Returns true if this record came from a successful fetch.
    pub fn is_available(&self) -> bool {
        self.error.is_none()
    }
}

/// Source of project metadata.
pub trait MetadataFetcher {
    /// Fetch metadata for one project.
    ///
    /// # Errors
    /// Returns [`AnalysisError::Retrieval`] on network failure or a
    /// non-success response.
    fn fetch(&self, project: &str) -> Result<ProjectMetadata, AnalysisError>;
}

/// Fetcher that never touches the network.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineFetcher;

impl MetadataFetcher for OfflineFetcher {
    fn fetch(&self, project: &str) -> Result<ProjectMetadata, AnalysisError> {
        Ok(ProjectMetadata::unavailable(project, "metadata fetch disabled"))
    }
}

/// How a run obtains project metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetadataMode {
    /// Query the GitHub contents API rooted at `api_base`.
    Github { api_base: String, timeout: Duration },
    /// Skip fetching and record placeholders.
    Offline,
}

impl Default for MetadataMode {
    fn default() -> Self {
        MetadataMode::Github {
            api_base: github::DEFAULT_API_BASE.to_string(),
            timeout: github::DEFAULT_TIMEOUT,
        }
    }
}

impl MetadataMode {
    /// Instantiate the configured fetcher.
    pub fn build(&self) -> Box<dyn MetadataFetcher> {
        match self {
            MetadataMode::Github { api_base, timeout } => {
                Box::new(GithubFetcher::new(api_base.clone(), *timeout))
            }
            MetadataMode::Offline => Box::new(OfflineFetcher),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_keeps_identity_fields() {
        let meta = ProjectMetadata::unavailable("zlib", "HTTP 404");
        assert_eq!(meta.name, "zlib");
        assert_eq!(meta.path, "projects/zlib");
        assert!(meta.files.is_empty());
        assert!(!meta.is_available());
        assert_eq!(
            meta.source_url,
            "https://github.com/google/oss-fuzz/tree/master/projects/zlib"
        );
    }

    #[test]
    fn error_field_is_omitted_when_available() {
        let meta = ProjectMetadata {
            name: "zlib".into(),
            path: project_path("zlib"),
            files: vec!["Dockerfile".into()],
            source_url: source_url("zlib"),
            error: None,
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert!(value.get("error").is_none());
        assert_eq!(value["files"][0], "Dockerfile");
    }

    #[test]
    fn offline_fetcher_never_fails() {
        let meta = OfflineFetcher.fetch("libpng").unwrap();
        assert_eq!(meta.error.as_deref(), Some("metadata fetch disabled"));
    }
}
