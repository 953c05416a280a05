#![no_main]

use libfuzzer_sys::fuzz_target;
use ironcve_normalizer::{commit, extract_git_commit};

fuzz_target!(|data: &[u8]| {
    if let Ok(url) = std::str::from_utf8(data) {
        if let Ok(hash) = commit(url) {
            assert!(!hash.is_empty(), "commit must not be empty for {url}");
        }
        // 결합 추출은 저장소와 커밋이 모두 있을 때만 값을 낸다
        if let Some(found) = extract_git_commit(url) {
            assert!(!found.repo.is_empty());
            assert!(!found.commit.is_empty());
        }
    }
});
