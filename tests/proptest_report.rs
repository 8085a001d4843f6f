use ossfuzz_analysis::report::{from_json_str, read_report, to_json_string, write_report, Report};
use proptest::prelude::*;
use proptest::strategy::ValueTree;

mod proptest_helpers;

use proptest_helpers::{approx_eq, approx_eq_opt};

fn assert_reports_equivalent(a: &Report, b: &Report) -> Result<(), TestCaseError> {
    prop_assert!(b.is_consistent());
    prop_assert_eq!(a.metadata.keys().collect::<Vec<_>>(), b.metadata.keys().collect::<Vec<_>>());
    prop_assert_eq!(a.analysis.keys().collect::<Vec<_>>(), b.analysis.keys().collect::<Vec<_>>());
    prop_assert_eq!(a.raw_data.keys().collect::<Vec<_>>(), b.raw_data.keys().collect::<Vec<_>>());

    for (name, left) in a.metadata.iter() {
        prop_assert_eq!(Some(left), b.metadata.get(name));
    }

    for (name, left) in a.analysis.iter() {
        let right = b.analysis.get(name).unwrap();
        prop_assert_eq!(left.unique_crashes, right.unique_crashes);
        prop_assert!(approx_eq(left.avg_coverage, right.avg_coverage));
        prop_assert_eq!(left.coverage_trend.len(), right.coverage_trend.len());
        for (l, r) in left.coverage_trend.iter().zip(&right.coverage_trend) {
            prop_assert_eq!(l.date, r.date);
            prop_assert!(approx_eq(l.coverage, r.coverage));
            prop_assert!(approx_eq_opt(l.growth_rate, r.growth_rate));
        }
    }

    for (name, left) in a.raw_data.iter() {
        let right = b.raw_data.get(name).unwrap();
        prop_assert_eq!(&left.crashes, &right.crashes);
        prop_assert_eq!(left.coverage.len(), right.coverage.len());
        for (l, r) in left.coverage.iter().zip(&right.coverage) {
            prop_assert_eq!(l.date, r.date);
            prop_assert!(approx_eq(l.coverage, r.coverage));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn report_json_roundtrip_preserves_keys_and_metrics(report in proptest_helpers::arb_report(5)) {
        let json = to_json_string(&report).expect("serialize report");
        let restored = from_json_str(&json).expect("parse report");

        assert_reports_equivalent(&report, &restored)?;
    }

    #[test]
    fn report_json_roundtrip_is_idempotent(report in proptest_helpers::arb_report(5)) {
        let first_json = to_json_string(&report).expect("serialize first pass");
        let first = from_json_str(&first_json).expect("parse first pass");
        let second_json = to_json_string(&first).expect("serialize second pass");

        prop_assert_eq!(first_json, second_json);
    }
}

#[test]
fn written_report_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("oss_fuzz_analysis.json");

    let mut runner = proptest::test_runner::TestRunner::deterministic();
    let report = proptest_helpers::arb_report(3)
        .new_tree(&mut runner)
        .expect("generate report")
        .current();

    write_report(&path, &report).expect("write report");
    let restored = read_report(&path).expect("read report");
    assert_reports_equivalent(&report, &restored).expect("equivalent reports");
}
