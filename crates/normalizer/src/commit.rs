//! 커밋 식별자 추출 -- 호스트별 URL 형태에서 커밋 해시를 꺼냄
//!
//! 규칙은 순서대로 시도됩니다.
//!
//! 1. cgit: `.../commit/?id=<hash>`
//! 2. gitweb CGI: `gitweb.cgi?p=<repo>;a=commit;h=<hash>`
//! 3. 일반: 경로의 마지막 세그먼트 바로 앞 디렉토리가 `commit/` 또는 `commits/`
//!
//! 풀 리퀘스트 URL에서 커밋을 해석하는 기능은 지원하지 않습니다.

use crate::error::NormalizerError;
use crate::repo::{UrlParts, parse_hierarchical_url, query_param};

/// 커밋 추출 규칙
struct CommitRule {
    name: &'static str,
    extract: fn(&UrlParts<'_>) -> Option<String>,
}

static COMMIT_RULES: &[CommitRule] = &[
    CommitRule {
        name: "cgit",
        extract: cgit,
    },
    CommitRule {
        name: "gitweb",
        extract: gitweb,
    },
    CommitRule {
        name: "commit-path",
        extract: commit_path,
    },
];

fn cgit(u: &UrlParts<'_>) -> Option<String> {
    if !(u.path.starts_with("/cgit") && u.path.ends_with("commit/")) {
        return None;
    }
    let id = u.query.strip_prefix("id=")?;
    let id = id.split(['&', ';']).next().unwrap_or(id);
    (!id.is_empty()).then(|| id.to_owned())
}

fn gitweb(u: &UrlParts<'_>) -> Option<String> {
    if !(u.path.starts_with("/cgi-bin/gitweb.cgi") && u.query.contains("a=commit")) {
        return None;
    }
    query_param(u.query, ';', "h").map(str::to_owned)
}

// GitHub/GitLab: .../commit/<hash>, Bitbucket: .../commits/<hash>
// Bitbucket URL은 끝에 '/'가 붙어 있는 경우가 있어 먼저 제거
fn commit_path(u: &UrlParts<'_>) -> Option<String> {
    let path = u.path.strip_suffix('/').unwrap_or(u.path);
    let (directory, last) = match path.rfind('/') {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    };
    if last.is_empty() {
        return None;
    }
    if directory.ends_with("commit/") || directory.ends_with("commits/") {
        return Some(last.to_owned());
    }
    None
}

/// URL에서 커밋 식별자를 반환합니다.
///
/// # Errors
///
/// - `MalformedUrl`: URL 파싱 실패
/// - `UnsupportedUrl`: 어떤 규칙에도 맞지 않음 (풀 리퀘스트 URL 포함)
///
/// # 예시
///
/// ```
/// use ironcve_normalizer::commit::commit;
///
/// assert_eq!(
///     commit("https://bitbucket.org/openpyxl/openpyxl/commits/3b4905f428e1").unwrap(),
///     "3b4905f428e1"
/// );
/// ```
pub fn commit(raw: &str) -> Result<String, NormalizerError> {
    let parsed = parse_hierarchical_url(raw)?;
    let parts = UrlParts::new(&parsed);

    for rule in COMMIT_RULES {
        if let Some(hash) = (rule.extract)(&parts) {
            tracing::trace!(url = raw, rule = rule.name, commit = %hash, "extracted commit");
            return Ok(hash);
        }
    }

    Err(NormalizerError::UnsupportedUrl(raw.to_owned()))
}
