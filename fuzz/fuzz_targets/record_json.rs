#![no_main]

use libfuzzer_sys::fuzz_target;

use ironcve_core::CveFeed;
use ironcve_normalizer::{cpes, extract_version_info, parse_cpe};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(items) = CveFeed::parse_items(json, "fuzz-input") else {
        return;
    };

    for item in items.iter().take(16) {
        let (info, notes) = extract_version_info(item, &[]);
        if info.affected_versions.is_empty() {
            assert!(notes.iter().any(|n| n == "No versions detected."));
        }
        for formatted in cpes(item) {
            let _ = parse_cpe(formatted);
        }
    }
});
