//! Fuzz target for config.json parsing.
//!
//! Parsing and validation should only ever return errors.

#![no_main]

use fm_config::Config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<Config>(data) {
        let _ = config.validate();
    }
});
