#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ironcve_normalizer::ValidVersions;
use ironcve_normalizer::versions::extract_versions_from_description;

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    description: String,
    /// 알려진 버전 목록 (최대 32개로 제한)
    valid_versions: Vec<String>,
}

fuzz_target!(|input: FuzzInput| {
    let valid_versions: Vec<String> = input.valid_versions.into_iter().take(32).collect();
    let valid = ValidVersions::new(&valid_versions);

    let (ranges, notes) = extract_versions_from_description(valid, &input.description);

    for range in &ranges {
        assert!(
            range.introduced.is_some() || range.fixed.is_some() || range.last_affected.is_some(),
            "empty range emitted: {range:?}"
        );
        assert!(
            range.fixed.is_none() || range.last_affected.is_none(),
            "both upper bounds set: {range:?}"
        );
    }
    if ranges.is_empty() {
        assert!(!notes.is_empty(), "no ranges and no notes");
    }
});
