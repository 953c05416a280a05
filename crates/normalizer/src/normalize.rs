//! 버전 문자열 정규화
//!
//! CPE 매치 데이터나 Git 태그의 버전 문자열을 비교/정렬용 형태로 바꿉니다.
//! 숫자 구간과 프리릴리스 키워드(`rc`, `alpha`, `beta`, `preview`)만 남기고
//! `-`로 연결합니다. 결과는 표시용이 아닙니다.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::NormalizerError;

/// 버전 구성요소: 숫자 또는 프리릴리스 키워드(+숫자)
///
/// ASCII 숫자만 인정합니다. 유니코드 `\d`는 `٣` 같은 다른 문자 체계의
/// 숫자까지 잡습니다.
static VERSION_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)(\d+|(?:rc|alpha|beta|preview)\d*)").expect("version component pattern is valid")
});

/// 프리릴리스 키워드로 시작하는 구성요소
static PRERELEASE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:rc|alpha|beta|preview)").expect("prerelease keyword pattern is valid")
});

/// 버전 문자열을 정규화합니다.
///
/// 첫 구성요소가 프리릴리스 키워드이면 버립니다. 제품명 등에 우연히
/// 포함된 키워드(예: `preview-1.2`)가 버전 앞에 오는 경우입니다.
///
/// # Errors
///
/// - `UnsupportedVersion`: 남는 구성요소가 없음
///
/// # 예시
///
/// ```
/// use ironcve_normalizer::normalize_version;
///
/// assert_eq!(normalize_version("v2.3.1-rc1").unwrap(), "2-3-1-rc1");
/// assert!(normalize_version("latest").is_err());
/// ```
pub fn normalize_version(version: &str) -> Result<String, NormalizerError> {
    let mut components: Vec<&str> = VERSION_COMPONENT
        .find_iter(version)
        .map(|m| m.as_str())
        .collect();

    if components.is_empty() {
        return Err(NormalizerError::UnsupportedVersion(version.to_owned()));
    }

    if PRERELEASE_KEYWORD.is_match(components[0]) {
        components.remove(0);
    }

    if components.is_empty() {
        return Err(NormalizerError::UnsupportedVersion(version.to_owned()));
    }

    Ok(components.join("-"))
}
