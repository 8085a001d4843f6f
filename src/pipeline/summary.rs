//! Console summary of a run.

use std::fmt;
use std::path::PathBuf;

use crate::analysis::round_to;

/// Headline numbers for one successfully processed project.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectSummary {
    pub project: String,
    pub unique_crashes: usize,
    pub avg_coverage: f64,
    /// False when metadata could not be fetched and a placeholder was used.
    pub metadata_available: bool,
}

/// A project that was left out of the report, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedProject {
    pub project: String,
    pub reason: String,
}

/// The outcome of a run, in input project order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub projects: Vec<ProjectSummary>,
    pub skipped: Vec<SkippedProject>,
    pub report_path: PathBuf,
    pub chart_path: PathBuf,
    /// Whether the chart has a title, axis labels and a legend.
    pub chart_labelled: bool,
}

impl RunSummary {
    pub fn processed_count(&self) -> usize {
        self.projects.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis summary")?;
        for project in &self.projects {
            write!(
                f,
                "  {}: {} unique crashes, {:.2}% average coverage",
                project.project,
                project.unique_crashes,
                round_to(project.avg_coverage, 2)
            )?;
            if !project.metadata_available {
                write!(f, " (metadata unavailable)")?;
            }
            writeln!(f)?;
        }

        if !self.skipped.is_empty() {
            writeln!(f, "Skipped {} project(s):", self.skipped.len())?;
            for skipped in &self.skipped {
                writeln!(f, "  {}: {}", skipped.project, skipped.reason)?;
            }
        }

        writeln!(f, "Report written to {}", self.report_path.display())?;
        write!(f, "Chart written to {}", self.chart_path.display())?;
        if !self.chart_labelled {
            write!(f, " (no font found, text omitted)")?;
        }
        writeln!(f)
    }
}
