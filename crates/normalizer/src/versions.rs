//! 버전 범위 추출 -- 매처 트리와 설명문에서 영향 버전 범위 도출
//!
//! 두 단계로 동작합니다.
//!
//! 1. **구조화 단계**: `OR` 노드의 취약 매치 항목에서 시작/끝 경계를 읽습니다.
//!    포함 끝 경계는 후속 버전을 찾아 배타적 `fixed`로 바꾸고, 후속 버전이
//!    없으면 `last_affected`로 기록합니다.
//! 2. **설명문 단계**: 구조화 단계가 아무 범위도 만들지 못했을 때만
//!    `<버전>? (through|before) <버전>` 패턴으로 설명문을 검색합니다.
//!
//! 어떤 단계도 실패를 반환하지 않습니다. 문제는 모두 노트로 보고됩니다.

use std::sync::LazyLock;

use ironcve_core::types::{CpeMatch, CveItem};
use regex::Regex;
use tracing::info;

use crate::config::NormalizerConfig;
use crate::reference::extract_git_commits;
use crate::repo::RepoResolver;
use crate::types::{AffectedVersion, VersionInfo};

/// 설명문 버전 범위 패턴
///
/// - `x.x.x before x.x.x`
/// - `x.x.x through x.x.x`
/// - `through x.x.x` / `before x.x.x`
///
/// 단어 문자와 공백은 ASCII로 한정합니다.
static DESCRIPTION_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)([\w.+\-]+)?\s+(through|before)\s+(?:version\s+)?([\w.+\-]+)")
        .expect("description range pattern is valid")
});

/// 후속 버전 조회 실패
///
/// `Display` 출력이 그대로 노트 문구가 됩니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuccessorError {
    /// 목록에 없는 버전
    #[error("Warning: {0} is not a valid version")]
    NotListed(String),
    /// 목록의 마지막 버전
    #[error("Warning: {0} does not have a version that comes after.")]
    NoSuccessor(String),
}

/// 호출자가 제공한 정렬된 유효 버전 목록
///
/// 버전 문자열은 일관되게 정렬할 수 없으므로, 후속 관계는 오직
/// 목록의 순서로만 정의됩니다.
#[derive(Debug, Clone, Copy)]
pub struct ValidVersions<'a> {
    versions: &'a [String],
}

impl<'a> ValidVersions<'a> {
    /// 목록을 감쌉니다.
    pub fn new(versions: &'a [String]) -> Self {
        Self { versions }
    }

    /// 목록이 비어 있는지 (검증 불가) 여부
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// 버전의 위치를 반환합니다.
    pub fn index_of(&self, version: &str) -> Option<usize> {
        self.versions.iter().position(|v| v == version)
    }

    /// 버전이 목록에 있는지 확인합니다. 빈 목록은 모든 버전을 허용합니다.
    pub fn contains(&self, version: &str) -> bool {
        self.is_empty() || self.index_of(version).is_some()
    }

    /// 목록에서 `version` 바로 다음 버전을 반환합니다.
    pub fn next_after(&self, version: &str) -> Result<&'a str, SuccessorError> {
        let idx = self
            .index_of(version)
            .ok_or_else(|| SuccessorError::NotListed(version.to_owned()))?;
        self.versions
            .get(idx + 1)
            .map(String::as_str)
            .ok_or_else(|| SuccessorError::NoSuccessor(version.to_owned()))
    }

    /// 목록을 순서대로 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> {
        self.versions.iter().map(String::as_str)
    }
}

/// 매처 경계 끝에 붙은 `:`를 제거합니다.
pub fn clean_version(version: &str) -> &str {
    version.trim_end_matches(':')
}

/// 설명문에서 잡힌 토큰을 정리합니다.
///
/// 문장 부호로 붙은 앞뒤 `.`를 제거하고, 숫자도 `.`도 없는 토큰은
/// 버전이 아닌 것으로 보고 빈 문자열을 반환합니다.
pub fn process_extracted_version(token: &str) -> &str {
    let version = token.trim_matches('.');
    if !version.contains('.') && !version.chars().any(|c| c.is_ascii_digit()) {
        return "";
    }
    version
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

/// 설명문에서 버전 범위를 추출합니다.
///
/// `through`는 포함 상한이므로 후속 버전을 찾아 배타적 `fixed`로 바꿉니다.
/// 후속 버전을 찾지 못하면 노트를 남기고 `fixed`는 비워 둡니다.
pub fn extract_versions_from_description(
    valid: ValidVersions<'_>,
    description: &str,
) -> (Vec<AffectedVersion>, Vec<String>) {
    let mut notes = Vec::new();
    let mut versions = Vec::new();
    let mut matched = false;

    for caps in DESCRIPTION_RANGE.captures_iter(description) {
        matched = true;
        let introduced = process_extracted_version(caps.get(1).map_or("", |m| m.as_str()));
        let mut fixed = process_extracted_version(caps.get(3).map_or("", |m| m.as_str()));

        // `Through`, `THROUGH`도 포함 끝 경계로 취급
        if caps[2].eq_ignore_ascii_case("through") {
            fixed = match valid.next_after(fixed) {
                Ok(next) => next,
                Err(e) => {
                    notes.push(e.to_string());
                    ""
                }
            };
        }

        if introduced.is_empty() && fixed.is_empty() {
            notes.push("Failed to match version range from description".to_owned());
            continue;
        }

        for bound in [introduced, fixed] {
            if !bound.is_empty() && !valid.contains(bound) {
                notes.push(format!("Extracted version {bound} is not a valid version"));
            }
        }

        versions.push(AffectedVersion {
            introduced: non_empty(introduced),
            fixed: non_empty(fixed),
            last_affected: None,
        });
    }

    if !matched {
        return (
            Vec::new(),
            vec!["Failed to parse versions from description".to_owned()],
        );
    }

    (versions, notes)
}

/// 매치 항목 하나에서 범위를 도출합니다. 경계가 없으면 `None`입니다.
fn range_from_match(
    entry: &CpeMatch,
    valid: ValidVersions<'_>,
    notes: &mut Vec<String>,
) -> Option<AffectedVersion> {
    let mut introduced = String::new();
    let mut fixed = String::new();
    let mut last_affected = String::new();

    if !entry.version_start_including.is_empty() {
        introduced = clean_version(&entry.version_start_including).to_owned();
    } else if !entry.version_start_excluding.is_empty() {
        match valid.next_after(clean_version(&entry.version_start_excluding)) {
            Ok(next) => introduced = next.to_owned(),
            Err(e) => notes.push(e.to_string()),
        }
    }

    if !entry.version_end_excluding.is_empty() {
        fixed = clean_version(&entry.version_end_excluding).to_owned();
    } else if !entry.version_end_including.is_empty() {
        let end = clean_version(&entry.version_end_including);
        match valid.next_after(end) {
            Ok(next) => fixed = next.to_owned(),
            Err(e) => {
                // 후속 버전을 모르면 끝 경계까지 취약하다는 것만 확실함
                notes.push(e.to_string());
                last_affected = end.to_owned();
                notes.push(format!("Using {end} as last_affected version instead"));
            }
        }
    }

    if introduced.is_empty() && fixed.is_empty() && last_affected.is_empty() {
        return None;
    }

    if !introduced.is_empty() && !valid.contains(&introduced) {
        notes.push(format!("Warning: {introduced} is not a valid introduced version"));
    }
    if !fixed.is_empty() && !valid.contains(&fixed) {
        notes.push(format!("Warning: {fixed} is not a valid fixed version"));
    }

    Some(AffectedVersion {
        introduced: non_empty(&introduced),
        fixed: non_empty(&fixed),
        last_affected: non_empty(&last_affected),
    })
}

/// 레코드 단위 버전 정보 추출기
///
/// 저장소 해석기와 설명문 단계 사용 여부를 보관합니다.
/// 생성 후 불변이며 여러 스레드에서 동시에 사용할 수 있습니다.
#[derive(Debug, Clone)]
pub struct VersionExtractor {
    resolver: RepoResolver,
    description_fallback: bool,
}

impl Default for VersionExtractor {
    fn default() -> Self {
        Self {
            resolver: RepoResolver::new(),
            description_fallback: true,
        }
    }
}

impl VersionExtractor {
    /// 내장 거부 목록과 설명문 단계를 사용하는 추출기를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 정규화 설정에서 추출기를 생성합니다.
    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self {
            resolver: RepoResolver::from_config(config),
            description_fallback: config.description_fallback,
        }
    }

    /// 저장소 해석기를 교체합니다.
    pub fn with_resolver(mut self, resolver: RepoResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// 설명문 단계 사용 여부를 설정합니다.
    pub fn with_description_fallback(mut self, enabled: bool) -> Self {
        self.description_fallback = enabled;
        self
    }

    /// 사용 중인 저장소 해석기
    pub fn resolver(&self) -> &RepoResolver {
        &self.resolver
    }

    /// 레코드에서 버전 정보와 진단 노트를 추출합니다.
    ///
    /// 참조 URL에서 해석된 커밋은 모두 `fix_commits`에만 들어갑니다.
    pub fn extract(&self, item: &CveItem, valid_versions: &[String]) -> (VersionInfo, Vec<String>) {
        let valid = ValidVersions::new(valid_versions);
        let mut info = VersionInfo {
            fix_commits: extract_git_commits(&self.resolver, item.reference_urls()),
            ..Default::default()
        };
        let mut notes = Vec::new();

        let mut got_versions = false;
        for node in &item.configurations.nodes {
            if node.operator != "OR" {
                continue;
            }
            for entry in node.cpe_match.iter().filter(|m| m.vulnerable) {
                let Some(range) = range_from_match(entry, valid, &mut notes) else {
                    continue;
                };
                got_versions = true;
                if !info.affected_versions.contains(&range) {
                    info.affected_versions.push(range);
                }
            }
        }

        if !got_versions && self.description_fallback {
            let (ranges, extract_notes) =
                extract_versions_from_description(valid, item.english_description());
            notes.extend(extract_notes);
            if !ranges.is_empty() {
                info!(
                    cve = item.id(),
                    versions = ?ranges,
                    "extracted versions from description"
                );
            }
            info.affected_versions = ranges;
        }

        if info.affected_versions.is_empty() {
            notes.push("No versions detected.".to_owned());
        }

        if !notes.is_empty() && !valid.is_empty() {
            notes.push("Valid versions:".to_owned());
            notes.extend(valid.iter().map(|v| format!("  - {v}")));
        }

        (info, notes)
    }
}

/// 기본 추출기로 레코드에서 버전 정보를 추출합니다.
///
/// [`VersionExtractor::extract`]의 단축 함수입니다.
pub fn extract_version_info(item: &CveItem, valid_versions: &[String]) -> (VersionInfo, Vec<String>) {
    VersionExtractor::new().extract(item, valid_versions)
}
