#![no_main]

use libfuzzer_sys::fuzz_target;
use ironcve_normalizer::normalize_version;

fuzz_target!(|data: &[u8]| {
    if let Ok(version) = std::str::from_utf8(data) {
        if let Ok(normalized) = normalize_version(version) {
            assert!(!normalized.is_empty());
            assert!(!normalized.starts_with('-') && !normalized.ends_with('-'));
            assert!(
                normalized.chars().all(|c| c == '-' || c.is_ascii_alphanumeric()),
                "unexpected character in {normalized:?}"
            );
        }
    }
});
