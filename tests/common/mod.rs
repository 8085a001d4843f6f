#![allow(dead_code)]

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use ossfuzz_analysis::data::{CoveragePoint, CrashRecord, ProjectDataset};

pub fn read_report_json(output_dir: &Path) -> serde_json::Value {
    let text = fs::read_to_string(output_dir.join("oss_fuzz_analysis.json")).expect("read report");
    serde_json::from_str(&text).expect("report is valid JSON")
}

pub fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Days::new(offset as u64)
}

pub fn dataset(hashes: &[&str], coverage: &[f64]) -> ProjectDataset {
    ProjectDataset {
        crashes: hashes
            .iter()
            .enumerate()
            .map(|(i, hash)| CrashRecord::new(day(i as u32), *hash, "heap-overflow"))
            .collect(),
        coverage: coverage
            .iter()
            .enumerate()
            .map(|(i, value)| CoveragePoint::new(day(i as u32), *value))
            .collect(),
    }
}

pub fn write_dataset(dir: &Path, project: &str, dataset: &ProjectDataset) {
    fs::create_dir_all(dir).expect("create data dir");
    let json = serde_json::to_string_pretty(dataset).expect("serialize dataset");
    fs::write(dir.join(format!("{project}.json")), json).expect("write dataset");
}
