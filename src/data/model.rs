//! Crash and coverage records for a single project.
//!
//! These types are the raw inputs to the aggregator and are written verbatim
//! into the `raw_data` section of the report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single crash observed by the fuzzer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrashRecord {
    /// Day the crash was reported.
    #[serde(with = "date_format")]
    pub date: NaiveDate,

    /// Fingerprint of the crash signature. Two records with the same hash
    /// describe the same crash.
    pub crash_hash: String,

    /// Crash category, e.g. `heap-overflow`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl CrashRecord {
    pub fn new(date: NaiveDate, crash_hash: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            date,
            crash_hash: crash_hash.into(),
            kind: kind.into(),
        }
    }
}

/// Coverage percentage measured on a given day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoveragePoint {
    #[serde(with = "date_format")]
    pub date: NaiveDate,

    /// Percentage of code exercised, in `[0, 100]`.
    pub coverage: f64,
}

impl CoveragePoint {
    pub fn new(date: NaiveDate, coverage: f64) -> Self {
        Self { date, coverage }
    }
}

/// Everything a data source knows about one project.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDataset {
    #[serde(default)]
    pub crashes: Vec<CrashRecord>,

    #[serde(default)]
    pub coverage: Vec<CoveragePoint>,
}

/// Parse a `DD-MM-YYYY` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, date_format::FORMAT)
}

/// Render a date as `DD-MM-YYYY`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(date_format::FORMAT).to_string()
}

/// Serde codec for `DD-MM-YYYY` dates.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(|source| {
            serde::de::Error::custom(format!(
                "invalid date '{raw}' (expected DD-MM-YYYY): {source}"
            ))
        })
    }
}
