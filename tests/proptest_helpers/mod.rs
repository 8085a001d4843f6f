#![allow(dead_code)]

use chrono::NaiveDate;
use ossfuzz_analysis::analysis::analyze_project;
use ossfuzz_analysis::data::{CoveragePoint, CrashRecord, ProjectDataset};
use ossfuzz_analysis::metadata::ProjectMetadata;
use ossfuzz_analysis::report::Report;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Tolerance for floats that went through a JSON round-trip.
pub const EPS_JSON: f64 = 1e-9;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(offset as u64)
}

/// Coverage percentages with two decimals, in `[0, 100]`.
pub fn arb_coverage_value() -> BoxedStrategy<f64> {
    (0u32..=10_000).prop_map(|v| v as f64 / 100.0).boxed()
}

/// Coverage points on strictly ascending dates.
pub fn arb_coverage_series(max_len: usize) -> BoxedStrategy<Vec<CoveragePoint>> {
    proptest::collection::vec((1u32..=30, arb_coverage_value()), 1..=max_len)
        .prop_map(|steps| {
            let mut offset = 0;
            steps
                .into_iter()
                .map(|(gap, coverage)| {
                    offset += gap;
                    CoveragePoint::new(day(offset), coverage)
                })
                .collect()
        })
        .boxed()
}

/// Crash records drawn from a small hash alphabet so duplicates are common.
pub fn arb_crashes(max_len: usize) -> BoxedStrategy<Vec<CrashRecord>> {
    proptest::collection::vec(
        (
            0u32..365,
            proptest::string::string_regex("[a-f]{1,2}").expect("valid hash regex"),
            proptest::sample::select(vec!["heap-overflow", "null-pointer", "use-after-free"]),
        ),
        0..=max_len,
    )
    .prop_map(|records| {
        records
            .into_iter()
            .map(|(offset, hash, kind)| CrashRecord::new(day(offset), hash, kind))
            .collect()
    })
    .boxed()
}

pub fn arb_dataset(max_crashes: usize, max_points: usize) -> BoxedStrategy<ProjectDataset> {
    (arb_crashes(max_crashes), arb_coverage_series(max_points))
        .prop_map(|(crashes, coverage)| ProjectDataset { crashes, coverage })
        .boxed()
}

/// Reports for up to `max_projects` distinct projects.
pub fn arb_report(max_projects: usize) -> BoxedStrategy<Report> {
    proptest::collection::vec(
        (
            proptest::string::string_regex("[a-z][a-z0-9-]{0,10}").expect("valid name regex"),
            arb_dataset(8, 8),
            any::<bool>(),
        ),
        1..=max_projects,
    )
    .prop_map(|projects| {
        let mut report = Report::new();
        for (name, dataset, fetched) in projects {
            let analysis = analyze_project(&name, &dataset).expect("generated data is valid");
            let metadata = if fetched {
                ProjectMetadata {
                    name: name.clone(),
                    path: format!("projects/{name}"),
                    files: vec!["Dockerfile".into(), "build.sh".into()],
                    source_url: format!(
                        "https://github.com/google/oss-fuzz/tree/master/projects/{name}"
                    ),
                    error: None,
                }
            } else {
                ProjectMetadata::unavailable(&name, "HTTP 404")
            };
            report.insert(&name, metadata, analysis, dataset);
        }
        report
    })
    .boxed()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS_JSON * a.abs().max(1.0)
}

pub fn approx_eq_opt(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => approx_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
