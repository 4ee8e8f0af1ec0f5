#![no_main]

use blbn_report::config::ExperimentConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(config) = ExperimentConfig::from_toml_str(input) {
            let _ = config.validate();
        }
    }
});
