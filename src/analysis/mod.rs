//! Crash and coverage aggregation.
//!
//! Reduces a project's raw records into the metrics shown in the report:
//! unique crash count, average coverage and the coverage growth trend.
//! Everything here is a pure function of its inputs.

mod report;

pub use report::{CoverageTrendPoint, ProjectAnalysis};

use std::collections::HashSet;

use crate::data::{CoveragePoint, CrashRecord, ProjectDataset};
use crate::error::AnalysisError;

/// Decimal places kept in growth rates.
pub const GROWTH_RATE_DECIMALS: i32 = 2;

/// Compute the full analysis for one project.
///
/// # Errors
/// Returns [`AnalysisError::EmptyDataset`] if there are no coverage points and
/// [`AnalysisError::InvalidData`] if a coverage value is not a percentage.
pub fn analyze_project(
    project: &str,
    dataset: &ProjectDataset,
) -> Result<ProjectAnalysis, AnalysisError> {
    check_coverage(project, &dataset.coverage)?;

    let sorted = sorted_by_date(&dataset.coverage);
    let avg_coverage =
        average_coverage(&sorted).ok_or_else(|| AnalysisError::EmptyDataset {
            project: project.to_string(),
        })?;

    Ok(ProjectAnalysis {
        unique_crashes: unique_crashes(&dataset.crashes),
        avg_coverage,
        coverage_trend: coverage_trend(&sorted),
    })
}

/// Count distinct crash hashes.
pub fn unique_crashes(crashes: &[CrashRecord]) -> usize {
    crashes
        .iter()
        .map(|crash| crash.crash_hash.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Mean coverage, or `None` for an empty series.
pub fn average_coverage(points: &[CoveragePoint]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    let sum: f64 = points.iter().map(|p| p.coverage).sum();
    Some(sum / points.len() as f64)
}

/// Annotate each point with its growth from the previous one.
///
/// `points` must already be in date order; see [`sorted_by_date`].
pub fn coverage_trend(points: &[CoveragePoint]) -> Vec<CoverageTrendPoint> {
    let mut previous: Option<f64> = None;

    points
        .iter()
        .map(|point| {
            let growth_rate = previous.and_then(|prev| growth_rate(prev, point.coverage));
            previous = Some(point.coverage);
            CoverageTrendPoint {
                date: point.date,
                coverage: point.coverage,
                growth_rate,
            }
        })
        .collect()
}

/// Percent change from `previous` to `current`, rounded.
///
/// There is no meaningful rate of change from zero, so that case is `None`.
/// A previous value so small that the rate overflows is treated the same way.
pub fn growth_rate(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    let rate = round_to((current - previous) / previous * 100.0, GROWTH_RATE_DECIMALS);
    rate.is_finite().then_some(rate)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Stable sort by date; measurements taken on the same day keep their order.
pub fn sorted_by_date(points: &[CoveragePoint]) -> Vec<CoveragePoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|point| point.date);
    sorted
}

fn check_coverage(project: &str, points: &[CoveragePoint]) -> Result<(), AnalysisError> {
    if points.is_empty() {
        return Err(AnalysisError::EmptyDataset {
            project: project.to_string(),
        });
    }

    if let Some(bad) = points
        .iter()
        .find(|p| !p.coverage.is_finite() || !(0.0..=100.0).contains(&p.coverage))
    {
        return Err(AnalysisError::InvalidData {
            project: project.to_string(),
            message: format!(
                "coverage {} on {} is outside [0, 100]",
                bad.coverage,
                crate::data::format_date(&bad.date)
            ),
        });
    }

    Ok(())
}
