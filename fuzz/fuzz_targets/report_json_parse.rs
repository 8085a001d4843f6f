//! Fuzz target for analysis report parsing.
//!
//! Feeds arbitrary bytes to the report parser and, for anything that parses,
//! checks that serializing it again does not panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ossfuzz_analysis::report::{from_json_slice, to_json_string};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(report) = from_json_slice(data) {
        let _ = report.is_consistent();
        let _ = to_json_string(&report);
    }
});
