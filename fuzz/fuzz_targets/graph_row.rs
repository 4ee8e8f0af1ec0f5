#![no_main]

use blbn_report::samples::score_row;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(row) = std::str::from_utf8(data) {
        // Malformed rows must come back as errors, never panics
        let _ = score_row(row);
    }
});
