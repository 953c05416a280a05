#![no_main]

use libfuzzer_sys::fuzz_target;
use ironcve_normalizer::{RepoResolver, repo};

fuzz_target!(|data: &[u8]| {
    if let Ok(url) = std::str::from_utf8(data) {
        // 해석 결과는 항상 scheme://host 로 시작한다
        if let Ok(resolved) = repo(url) {
            assert!(resolved.contains("://"), "resolved repo has no scheme: {resolved}");
        }
        // 추가 거부 목록은 결과를 늘리지 않는다
        let strict = RepoResolver::with_extra_denylist(vec!["https://github.com/".to_owned()]);
        if strict.resolve(url).is_ok() {
            assert!(repo(url).is_ok());
        }
    }
});
