use std::time::Duration;

use serde_json::Value;

use super::{project_path, source_url, MetadataFetcher, ProjectMetadata};
use crate::error::AnalysisError;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Reads project directory listings through the GitHub contents API.
#[derive(Clone, Debug)]
pub struct GithubFetcher {
    api_base: String,
    timeout: Duration,
}

impl GithubFetcher {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_base: api_base.into(),
            timeout,
        }
    }

    /// Contents API URL for a project directory.
    pub fn listing_url(&self, project: &str) -> Result<url::Url, String> {
        let mut url = url::Url::parse(&self.api_base).map_err(|source| source.to_string())?;
        url.path_segments_mut()
            .map_err(|_| format!("'{}' cannot be used as a base URL", self.api_base))?
            .pop_if_empty()
            .extend(["repos", "google", "oss-fuzz", "contents", "projects", project]);
        Ok(url)
    }

    fn fetch_listing(&self, project: &str) -> Result<Value, String> {
        let url = self.listing_url(project)?;

        let config = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build();
        let agent: ureq::Agent = config.into();

        log::debug!("GET {url}");
        let mut response = agent
            .get(url.as_str())
            .header("Accept", "application/vnd.github+json")
            .header(
                "User-Agent",
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )
            .call()
            .map_err(|source| source.to_string())?;

        response
            .body_mut()
            .read_json::<Value>()
            .map_err(|source| source.to_string())
    }
}

impl MetadataFetcher for GithubFetcher {
    fn fetch(&self, project: &str) -> Result<ProjectMetadata, AnalysisError> {
        if project.trim().is_empty() {
            return Err(AnalysisError::Retrieval {
                project: project.to_string(),
                message: "project name is empty".to_string(),
            });
        }

        let listing = self
            .fetch_listing(project)
            .map_err(|message| AnalysisError::Retrieval {
                project: project.to_string(),
                message,
            })?;

        parse_listing(project, &listing).map_err(|message| AnalysisError::Retrieval {
            project: project.to_string(),
            message,
        })
    }
}

/// Turn a contents API directory listing into a metadata record.
pub fn parse_listing(project: &str, listing: &Value) -> Result<ProjectMetadata, String> {
    let entries = listing.as_array().ok_or_else(|| {
        let detail = listing
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("response is not a directory listing");
        format!("unexpected listing: {detail}")
    })?;

    let files = entries
        .iter()
        .filter_map(|entry| entry.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    Ok(ProjectMetadata {
        name: project.to_string(),
        path: project_path(project),
        files,
        source_url: source_url(project),
        error: None,
    })
}
