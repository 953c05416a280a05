#![no_main]

use libfuzzer_sys::fuzz_target;
use ironcve_normalizer::cpe::unbind::unbind_fs;
use ironcve_normalizer::parse_cpe;

fuzz_target!(|data: &[u8]| {
    if let Ok(formatted) = std::str::from_utf8(data) {
        let _ = unbind_fs(formatted);
        if let Ok(cpe) = parse_cpe(formatted) {
            assert_eq!(cpe.cpe_version, "2.3");
            assert!(matches!(cpe.part.as_str(), "a" | "o" | "h" | "ANY"));
        }
    }
});
