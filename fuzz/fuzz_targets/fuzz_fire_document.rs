//! Fuzz target for fire document parsing and merging.
//!
//! Any document that parses must merge without panicking.

#![no_main]

use fm_config::MergeConfig;
use fm_core::io::parse_document;
use fm_core::FireMerger;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(doc) = parse_document(data) {
        let _ = FireMerger::new(&MergeConfig::default()).merge(&doc.fires);
    }
});
