//! Built-in sample data standing in for a real crash/coverage feed.

use chrono::NaiveDate;

use super::{CoveragePoint, CrashRecord, DataSource, ProjectDataset};
use crate::error::AnalysisError;

/// Projects with sample data, and the coverage each one starts from.
pub const BASE_COVERAGE: &[(&str, f64)] = &[("zlib", 70.0), ("libpng", 75.0), ("openssl", 65.0)];

/// Sample crashes shared by every project: `(date, hash, type)`.
const CRASHES: &[((i32, u32, u32), &str, &str)] = &[
    ((2025, 1, 15), "mno345", "null-pointer"),
    ((2025, 1, 28), "pqr678", "division-by-zero"),
    ((2025, 1, 31), "jkl012", "integer-overflow"),
    ((2025, 2, 10), "stu901", "buffer-overflow"),
    ((2025, 2, 20), "vwx234", "race-condition"),
    ((2025, 2, 25), "ghi789", "stack-overflow"),
    ((2025, 3, 6), "def456", "use-after-free"),
    ((2025, 3, 6), "abc123", "heap-overflow"),
    ((2025, 3, 15), "abc123", "heap-overflow"),
];

/// Coverage measurement dates and the gain over the project's base.
const COVERAGE_STEPS: &[((i32, u32, u32), f64)] = &[
    ((2025, 1, 15), 0.0),
    ((2025, 1, 28), 3.0),
    ((2025, 1, 31), 5.0),
    ((2025, 2, 10), 7.0),
    ((2025, 2, 20), 10.0),
    ((2025, 2, 25), 12.0),
    ((2025, 3, 6), 15.0),
    ((2025, 3, 6), 17.0),
    ((2025, 3, 15), 20.0),
];

/// Deterministic sample data keyed by project name.
///
/// Unrecognized names are rejected rather than given a fallback sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntheticSource;

impl SyntheticSource {
    /// Names this source has data for.
    pub fn known_projects() -> impl Iterator<Item = &'static str> {
        BASE_COVERAGE.iter().map(|(name, _)| *name)
    }

    fn base_coverage(project: &str) -> Option<f64> {
        BASE_COVERAGE
            .iter()
            .find(|(name, _)| *name == project)
            .map(|(_, base)| *base)
    }
}

impl DataSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn load(&self, project: &str) -> Result<ProjectDataset, AnalysisError> {
        let base = Self::base_coverage(project).ok_or_else(|| AnalysisError::UnknownProject {
            project: project.to_string(),
            message: format!(
                "no synthetic dataset (available: {})",
                Self::known_projects().collect::<Vec<_>>().join(", ")
            ),
        })?;

        let crashes = CRASHES
            .iter()
            .map(|(ymd, hash, kind)| CrashRecord::new(sample_date(*ymd), *hash, *kind))
            .collect();

        let coverage = COVERAGE_STEPS
            .iter()
            .map(|(ymd, gain)| CoveragePoint::new(sample_date(*ymd), base + gain))
            .collect();

        Ok(ProjectDataset { crashes, coverage })
    }
}

fn sample_date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    // The tables above only hold valid calendar dates.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
