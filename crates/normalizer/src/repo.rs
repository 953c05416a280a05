//! 저장소 URL 정규화 -- 참조 URL에서 기본 저장소 URL 추출
//!
//! 코드 호스팅 플랫폼마다 커밋, 이슈, 비교, 릴리스 URL 형태가 제각각입니다.
//! [`RepoResolver`]는 거부 목록을 먼저 적용한 뒤, 정렬된 호스트 규칙 테이블
//! ([`HOST_RULES`])을 순서대로 시도하여 처음 매칭된 규칙의 결과를 반환합니다.
//!
//! # 처리 순서
//!
//! ```text
//! url --> parse --> 거부 정규식 --> 거부 접두사 --> 이미 정규형? --> HOST_RULES[0..] --> UnsupportedUrl
//! ```
//!
//! # 예시
//!
//! ```
//! use ironcve_normalizer::repo::repo;
//!
//! assert_eq!(
//!     repo("https://gitlab.com/libtiff/libtiff/-/merge_requests/378").unwrap(),
//!     "https://gitlab.com/libtiff/libtiff"
//! );
//! ```

use tracing::debug;
use url::Url;

use crate::config::NormalizerConfig;
use crate::denylist;
use crate::error::NormalizerError;

/// 경로만으로 이미 정규형인지 판단할 수 있는 호스트
const SUPPORTED_HOSTS: &[&str] = &["github.com", "gitlab.org", "bitbucket.org"];

/// GitHub/GitLab 객체 URL을 나타내는 경로 키워드
const HOSTED_OBJECT_KEYWORDS: &[&str] = &[
    "commit",
    "blob",
    "releases/tag",
    "releases",
    "tags",
    "security/advisories",
    "issues",
];

/// Bitbucket 저장소 하위 페이지 키워드
const BITBUCKET_KEYWORDS: &[&str] = &[
    "changeset",
    "downloads",
    "wiki",
    "issues",
    "security",
    "pull-requests",
    "commits",
];

/// freedesktop cgit 미러의 원본 호스트
const FREEDESKTOP_GITLAB: &str = "https://gitlab.freedesktop.org";

/// 규칙이 참조하는 URL 구성요소
#[derive(Debug, Clone, Copy)]
pub(crate) struct UrlParts<'a> {
    pub scheme: &'a str,
    pub host: &'a str,
    pub path: &'a str,
    pub query: &'a str,
}

impl<'a> UrlParts<'a> {
    pub(crate) fn new(url: &'a Url) -> Self {
        Self {
            scheme: url.scheme(),
            host: url.host_str().unwrap_or(""),
            path: url.path(),
            query: url.query().unwrap_or(""),
        }
    }

    fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// 경로를 `/`로 나눈 앞의 세 조각(선행 빈 조각 포함)으로 URL을 만듭니다.
    ///
    /// `/owner/repo/...` -> `scheme://host/owner/repo`.
    /// 조각이 셋 미만이면 `None`입니다.
    fn first_three_segments(&self) -> Option<String> {
        let segments: Vec<&str> = self.path.split('/').take(3).collect();
        if segments.len() < 3 {
            return None;
        }
        Some(format!("{}{}", self.origin(), segments.join("/")))
    }
}

/// URL 문자열을 파싱합니다.
pub(crate) fn parse_url(raw: &str) -> Result<Url, NormalizerError> {
    Url::parse(raw).map_err(|e| NormalizerError::MalformedUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// 경로 구조가 있는 URL만 파싱합니다.
///
/// `mailto:`처럼 호스트와 계층 경로가 없는 URL은 규칙을 적용할 수 없으므로
/// `UnsupportedUrl`입니다.
pub(crate) fn parse_hierarchical_url(raw: &str) -> Result<Url, NormalizerError> {
    let parsed = parse_url(raw)?;
    if parsed.cannot_be_a_base() {
        return Err(NormalizerError::UnsupportedUrl(raw.to_owned()));
    }
    Ok(parsed)
}

/// `sep`로 구분된 쿼리에서 `key=` 파라미터 값을 찾습니다.
pub(crate) fn query_param<'a>(query: &'a str, sep: char, key: &str) -> Option<&'a str> {
    query
        .split(sep)
        .filter_map(|param| param.strip_prefix(key)?.strip_prefix('='))
        .find(|value| !value.is_empty())
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// 호스트별 구조 규칙
///
/// `resolve`가 `Some`을 반환하면 그 값이 정규 저장소 URL입니다.
pub struct HostRule {
    /// 규칙 이름 (로그용)
    pub name: &'static str,
    resolve: fn(&UrlParts<'_>) -> Option<String>,
}

/// 정렬된 호스트 규칙 테이블. 첫 번째로 매칭된 규칙이 적용됩니다.
pub static HOST_RULES: &[HostRule] = &[
    HostRule {
        name: "cgit",
        resolve: cgit,
    },
    HostRule {
        name: "gitweb",
        resolve: gitweb,
    },
    HostRule {
        name: "freedesktop",
        resolve: freedesktop,
    },
    HostRule {
        name: "hosted-object",
        resolve: hosted_object,
    },
    HostRule {
        name: "compare",
        resolve: compare,
    },
    HostRule {
        name: "github-pull",
        resolve: github_pull,
    },
    HostRule {
        name: "gitlab-merge-request",
        resolve: gitlab_merge_request,
    },
    HostRule {
        name: "bitbucket",
        resolve: bitbucket,
    },
];

// https://git.kernel.org/cgit/linux/kernel/git/torvalds/linux.git/commit/?id=<hash>
fn cgit(u: &UrlParts<'_>) -> Option<String> {
    if !(u.path.starts_with("/cgit") && u.path.ends_with("commit/") && u.query.starts_with("id="))
    {
        return None;
    }
    let repo = u.path.strip_suffix("/commit/").unwrap_or(u.path);
    Some(format!("{}{repo}", u.origin()))
}

// https://git.gnupg.org/cgi-bin/gitweb.cgi?p=libksba.git;a=commit;h=<hash>
fn gitweb(u: &UrlParts<'_>) -> Option<String> {
    if !u.path.starts_with("/cgi-bin/gitweb.cgi") {
        return None;
    }
    let repo = query_param(u.query, ';', "p")?;
    Some(format!("{}/{repo}", u.origin()))
}

// cgit.freedesktop.org는 gitlab.freedesktop.org의 미러
fn freedesktop(u: &UrlParts<'_>) -> Option<String> {
    if u.host != "cgit.freedesktop.org" {
        return None;
    }
    let repo = if u.path.ends_with("commit/") && u.query.starts_with("id=") {
        u.path.strip_suffix("/commit/").unwrap_or(u.path)
    } else if u.path.ends_with("refs/tags") {
        u.path.strip_suffix("/refs/tags").unwrap_or(u.path)
    } else if u.path.split('/').count() == 4 {
        u.path
    } else {
        return None;
    };
    Some(format!("{FREEDESKTOP_GITLAB}{repo}"))
}

fn hosted_object(u: &UrlParts<'_>) -> Option<String> {
    if (u.host == "github.com" || u.host.starts_with("gitlab."))
        && contains_any(u.path, HOSTED_OBJECT_KEYWORDS)
    {
        return u.first_three_segments();
    }
    None
}

// 호스트와 무관: GitHub, GitLab, git.drupalcode.org 등
fn compare(u: &UrlParts<'_>) -> Option<String> {
    if u.path.contains("compare") {
        return u.first_three_segments();
    }
    None
}

fn github_pull(u: &UrlParts<'_>) -> Option<String> {
    if u.host == "github.com" && u.path.contains("pull") {
        return u.first_three_segments();
    }
    None
}

fn gitlab_merge_request(u: &UrlParts<'_>) -> Option<String> {
    if u.host.starts_with("gitlab.") && u.path.contains("merge_requests") {
        return u.first_three_segments();
    }
    None
}

fn bitbucket(u: &UrlParts<'_>) -> Option<String> {
    if u.host == "bitbucket.org" && contains_any(u.path, BITBUCKET_KEYWORDS) {
        return u.first_three_segments();
    }
    None
}

/// 저장소 URL 해석기
///
/// 내장 거부 목록은 항상 적용되며, 설정으로 접두사를 추가할 수 있습니다.
/// 생성 후에는 불변이므로 스레드 간 공유가 자유롭습니다.
#[derive(Debug, Clone, Default)]
pub struct RepoResolver {
    /// 내장 목록에 더해 거부할 URL 접두사
    extra_denylist: Vec<String>,
}

impl RepoResolver {
    /// 내장 거부 목록만 사용하는 해석기를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 추가 거부 접두사를 가진 해석기를 생성합니다.
    pub fn with_extra_denylist(extra_denylist: Vec<String>) -> Self {
        Self { extra_denylist }
    }

    /// 정규화 설정에서 해석기를 생성합니다.
    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self::with_extra_denylist(config.extra_denylist.clone())
    }

    /// 추가 거부 접두사 목록을 반환합니다.
    pub fn extra_denylist(&self) -> &[String] {
        &self.extra_denylist
    }

    /// 임의의 URL에서 정규 저장소 URL을 반환합니다.
    ///
    /// # Errors
    ///
    /// - `MalformedUrl`: URL 파싱 실패
    /// - `Denylisted`: 거부 정규식 또는 거부 접두사에 매칭
    /// - `UnsupportedUrl`: 어떤 호스트 규칙에도 맞지 않음
    pub fn resolve(&self, raw: &str) -> Result<String, NormalizerError> {
        let parsed = parse_hierarchical_url(raw)?;

        if denylist::matches_pattern(raw) {
            return Err(NormalizerError::Denylisted {
                url: raw.to_owned(),
                reason: "matched invalid repo pattern".to_owned(),
            });
        }

        if let Some(prefix) = self.denylisted_prefix(raw) {
            return Err(NormalizerError::Denylisted {
                url: raw.to_owned(),
                reason: format!("found in denylist ({prefix})"),
            });
        }

        let parts = UrlParts::new(&parsed);

        // 이미 owner/repo 형태인 기본 저장소 URL
        if SUPPORTED_HOSTS.contains(&parts.host) {
            let path = parts.path.strip_suffix('/').unwrap_or(parts.path);
            if path.split('/').count() == 3 {
                return Ok(format!("{}{path}", parts.origin()));
            }
        }

        for rule in HOST_RULES {
            if let Some(repo) = (rule.resolve)(&parts) {
                debug!(url = raw, rule = rule.name, repo = %repo, "resolved repository url");
                return Ok(repo);
            }
        }

        Err(NormalizerError::UnsupportedUrl(raw.to_owned()))
    }

    fn denylisted_prefix<'a>(&'a self, raw: &str) -> Option<&'a str> {
        denylist::matching_prefix(raw).or_else(|| {
            self.extra_denylist
                .iter()
                .map(String::as_str)
                .find(|prefix| raw.starts_with(prefix))
        })
    }
}

/// 내장 거부 목록으로 정규 저장소 URL을 반환합니다.
///
/// [`RepoResolver::resolve`]의 단축 함수입니다.
pub fn repo(raw: &str) -> Result<String, NormalizerError> {
    RepoResolver::new().resolve(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_repo(input: &str, expected: &str) {
        assert_eq!(repo(input).as_deref(), Ok(expected), "input: {input}");
    }

    #[test]
    fn github_commit_url() {
        assert_repo(
            "https://github.com/MariaDB/server/commit/b1351c15946349f9daa7e5297fb2ac6f3139e4a8",
            "https://github.com/MariaDB/server",
        );
    }

    #[test]
    fn github_blob_release_issue_and_advisory_urls() {
        assert_repo(
            "https://github.com/tensorflow/tensorflow/blob/master/tensorflow/core/ops/math_ops.cc",
            "https://github.com/tensorflow/tensorflow",
        );
        assert_repo(
            "https://github.com/JonMagon/KDiskMark/releases/tag/3.1.0",
            "https://github.com/JonMagon/KDiskMark",
        );
        assert_repo(
            "https://github.com/axiomatic-systems/Bento4/issues/755",
            "https://github.com/axiomatic-systems/Bento4",
        );
        assert_repo(
            "https://github.com/ballcat-projects/ballcat-codegen/security/advisories/GHSA-fv3m-xhqw-9m79",
            "https://github.com/ballcat-projects/ballcat-codegen",
        );
    }

    #[test]
    fn gitlab_object_urls() {
        assert_repo(
            "https://gitlab.freedesktop.org/virgl/virglrenderer/-/commit/b05bb61f454eeb8a85164c8a31510aeb9d79129c",
            "https://gitlab.freedesktop.org/virgl/virglrenderer",
        );
        assert_repo(
            "https://gitlab.com/qemu-project/qemu/-/commit/4367a20cc4",
            "https://gitlab.com/qemu-project/qemu",
        );
        assert_repo(
            "https://gitlab.com/gitlab-org/cves/-/blob/master/2022/CVE-2022-2501.json",
            "https://gitlab.com/gitlab-org/cves",
        );
        assert_repo(
            "https://gitlab.com/wireshark/wireshark/-/issues/18307",
            "https://gitlab.com/wireshark/wireshark",
        );
    }

    #[test]
    fn cgit_url() {
        assert_repo(
            "https://git.dpkg.org/cgit/dpkg/dpkg.git/commit/?id=faa4c92debe45412bfcf8a44f26e827800bb24be",
            "https://git.dpkg.org/cgit/dpkg/dpkg.git",
        );
        assert_repo(
            "https://git.kernel.org/cgit/linux/kernel/git/torvalds/linux.git/commit/?id=817b8b9c5396d2b2d92311b46719aad5d3339dbe",
            "https://git.kernel.org/cgit/linux/kernel/git/torvalds/linux.git",
        );
    }

    #[test]
    fn gitweb_url() {
        assert_repo(
            "https://git.gnupg.org/cgi-bin/gitweb.cgi?p=libksba.git;a=commit;h=f61a5ea4e0f6a80fd4b28ef0174bee77793cf070",
            "https://git.gnupg.org/libksba.git",
        );
        // p=가 첫 파라미터가 아니어도 됨
        assert_repo(
            "https://git.gnupg.org/cgi-bin/gitweb.cgi?a=commit;p=gnupg.git;h=abc",
            "https://git.gnupg.org/gnupg.git",
        );
    }

    #[test]
    fn gitweb_without_project_is_unsupported() {
        assert!(matches!(
            repo("https://git.gnupg.org/cgi-bin/gitweb.cgi?a=commit;h=abc"),
            Err(NormalizerError::UnsupportedUrl(_))
        ));
    }

    #[test]
    fn freedesktop_mirror_is_rewritten() {
        assert_repo(
            "https://cgit.freedesktop.org/xorg/lib/libXRes/commit/?id=c05c6d918b0e2011d4bfa370c321482e34630b17",
            "https://gitlab.freedesktop.org/xorg/lib/libXRes",
        );
        assert_repo(
            "https://cgit.freedesktop.org/xorg/lib/libXRes",
            "https://gitlab.freedesktop.org/xorg/lib/libXRes",
        );
        assert_repo(
            "http://cgit.freedesktop.org/spice/spice/refs/tags",
            "https://gitlab.freedesktop.org/spice/spice",
        );
    }

    #[test]
    fn compare_urls_on_any_host() {
        assert_repo(
            "https://github.com/kovidgoyal/kitty/compare/v0.26.1...v0.26.2",
            "https://github.com/kovidgoyal/kitty",
        );
        assert_repo(
            "https://gitlab.com/mayan-edms/mayan-edms/-/compare/development...master",
            "https://gitlab.com/mayan-edms/mayan-edms",
        );
        assert_repo(
            "https://git.drupalcode.org/project/views/-/compare/7.x-3.21...7.x-3.x",
            "https://git.drupalcode.org/project/views",
        );
    }

    #[test]
    fn pull_and_merge_request_urls() {
        assert_repo(
            "https://github.com/google/osv.dev/pull/738",
            "https://github.com/google/osv.dev",
        );
        assert_repo(
            "https://gitlab.com/libtiff/libtiff/-/merge_requests/378",
            "https://gitlab.com/libtiff/libtiff",
        );
    }

    #[test]
    fn bitbucket_urls() {
        for (input, expected) in [
            (
                "https://bitbucket.org/ianb/pastescript/changeset/a19e462769b4",
                "https://bitbucket.org/ianb/pastescript",
            ),
            (
                "https://bitbucket.org/jespern/django-piston/commits/91bdaec89543/",
                "https://bitbucket.org/jespern/django-piston",
            ),
            (
                "https://bitbucket.org/snakeyaml/snakeyaml/pull-requests/35",
                "https://bitbucket.org/snakeyaml/snakeyaml",
            ),
            (
                "https://bitbucket.org/snakeyaml/snakeyaml/issues/566",
                "https://bitbucket.org/snakeyaml/snakeyaml",
            ),
            (
                "https://bitbucket.org/snakeyaml/snakeyaml/downloads/?tab=tags",
                "https://bitbucket.org/snakeyaml/snakeyaml",
            ),
        ] {
            assert_repo(input, expected);
        }
    }

    #[test]
    fn canonical_url_is_idempotent() {
        for url in [
            "https://github.com/MariaDB/server",
            "https://bitbucket.org/snakeyaml/snakeyaml",
            "https://gitlab.org/group/project",
        ] {
            assert_repo(url, url);
            let once = repo(url).unwrap();
            assert_eq!(repo(&once).unwrap(), once);
        }
        assert_repo(
            "https://github.com/MariaDB/server/",
            "https://github.com/MariaDB/server",
        );
    }

    #[test]
    fn denylisted_prefix_regardless_of_suffix() {
        for prefix in denylist::DENYLISTED_REPOS {
            for suffix in ["", "/", "/blob/master/README.md", "/issues/1"] {
                let url = format!("{prefix}{suffix}");
                assert!(
                    matches!(repo(&url), Err(NormalizerError::Denylisted { .. })),
                    "expected {url} to be denylisted"
                );
            }
        }
    }

    #[test]
    fn denylisted_by_pattern() {
        for url in [
            "https://github.com/someone/CVE-2022-12345",
            "https://github.com/someone/research/CVEs",
            "https://github.com/GitHubAssessments/anything/else",
        ] {
            assert!(
                matches!(repo(url), Err(NormalizerError::Denylisted { .. })),
                "expected {url} to be denylisted"
            );
        }
    }

    #[test]
    fn extra_denylist_from_resolver() {
        let resolver =
            RepoResolver::with_extra_denylist(vec!["https://github.com/acme/advisories".to_owned()]);
        assert!(matches!(
            resolver.resolve("https://github.com/acme/advisories/blob/main/2022.md"),
            Err(NormalizerError::Denylisted { .. })
        ));
        // 내장 목록도 계속 적용
        assert!(matches!(
            resolver.resolve("https://github.com/CVEProject/cvelist"),
            Err(NormalizerError::Denylisted { .. })
        ));
        assert_eq!(
            resolver.resolve("https://github.com/acme/widget/commit/abc").unwrap(),
            "https://github.com/acme/widget"
        );
    }

    #[test]
    fn unsupported_urls() {
        for url in [
            "https://www.openwall.com/lists/oss-security/2022/01/11/1",
            "https://security.gentoo.org/glsa/202208-01",
            "https://github.com/MariaDB",
            "https://github.com/",
            "https://gitlab.com/commit",
        ] {
            assert!(
                matches!(repo(url), Err(NormalizerError::UnsupportedUrl(_))),
                "expected {url} to be unsupported"
            );
        }
    }

    #[test]
    fn malformed_urls() {
        for url in ["not a url", "https://[::1/foo", ""] {
            assert!(
                matches!(repo(url), Err(NormalizerError::MalformedUrl { .. })),
                "expected {url} to be malformed"
            );
        }
    }

    #[test]
    fn urls_without_hierarchy_are_unsupported() {
        for url in ["mailto:compare/a/b", "mailto:security@github.com", "urn:cve:compare/owner/repo"] {
            assert!(
                matches!(repo(url), Err(NormalizerError::UnsupportedUrl(_))),
                "expected {url} to be unsupported"
            );
        }
    }

    #[test]
    fn query_param_lookup() {
        assert_eq!(query_param("p=a.git;a=commit", ';', "p"), Some("a.git"));
        assert_eq!(query_param("a=commit;h=abc", ';', "h"), Some("abc"));
        assert_eq!(query_param("a=commit;hb=abc", ';', "h"), None);
        assert_eq!(query_param("p=;a=commit", ';', "p"), None);
    }

    #[test]
    fn rule_table_order() {
        let names: Vec<&str> = HOST_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "cgit",
                "gitweb",
                "freedesktop",
                "hosted-object",
                "compare",
                "github-pull",
                "gitlab-merge-request",
                "bitbucket"
            ]
        );
    }
}
