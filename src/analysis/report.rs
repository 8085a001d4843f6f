//! Aggregated per-project metrics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::date_format;

/// Summary metrics for one project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    /// Number of distinct crash hashes.
    pub unique_crashes: usize,
    /// Arithmetic mean of all coverage measurements.
    pub avg_coverage: f64,
    /// Coverage measurements in date order, with growth between neighbours.
    pub coverage_trend: Vec<CoverageTrendPoint>,
}

/// A coverage measurement annotated with its change from the previous one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoverageTrendPoint {
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub coverage: f64,
    /// Percent change from the previous point, rounded to two decimals.
    /// `None` for the first point and after a zero-coverage point.
    pub growth_rate: Option<f64>,
}
