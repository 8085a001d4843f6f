//! Fuzz target for exported dataset parsing and aggregation.
//!
//! Any dataset that parses must aggregate to either a result or an error,
//! never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ossfuzz_analysis::analysis::analyze_project;
use ossfuzz_analysis::data::file::from_json_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(dataset) = from_json_slice(data) {
        let _ = analyze_project("fuzz", &dataset);
    }
});
