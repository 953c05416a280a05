//! 도메인 타입 -- 정규화 결과 값
//!
//! 저장소 커밋, 영향 버전 범위, CPE 분해 결과를 정의합니다.
//! 모두 불변 값으로 취급하며 구조적 동등성으로 비교합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 저장소 URL과 커밋 식별자 쌍
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GitCommit {
    /// 정규 저장소 URL (예: `https://github.com/MariaDB/server`)
    pub repo: String,
    /// 커밋 식별자
    pub commit: String,
}

impl fmt::Display for GitCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.repo, self.commit)
    }
}

/// 영향받는 버전 범위
///
/// `fixed`와 `last_affected` 중 하나만 의미를 가집니다.
///
/// - `fixed`: 배타적 상한 (이 버전은 영향받지 않음)
/// - `last_affected`: 포괄적 상한. 후속 버전을 알 수 없을 때만 사용
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AffectedVersion {
    /// 도입 버전 (이 버전부터 영향)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduced: Option<String>,
    /// 수정 버전
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<String>,
    /// 마지막 영향 버전
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_affected: Option<String>,
}

impl fmt::Display for AffectedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let introduced = self.introduced.as_deref().unwrap_or("0");
        match (&self.fixed, &self.last_affected) {
            (Some(fixed), _) => write!(f, "[{introduced}, {fixed})"),
            (None, Some(last)) => write!(f, "[{introduced}, {last}]"),
            (None, None) => write!(f, "[{introduced}, *)"),
        }
    }
}

/// 레코드 하나에서 추출한 버전 정보
///
/// 참조 URL에서는 `fix_commits`만 채워집니다. 나머지 커밋 목록은
/// 다른 소스가 채울 수 있도록 구조만 유지합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// 취약점을 도입한 커밋
    pub introduced_commits: Vec<GitCommit>,
    /// 취약점을 수정한 커밋
    pub fix_commits: Vec<GitCommit>,
    /// 범위 제한 커밋
    pub limit_commits: Vec<GitCommit>,
    /// 마지막 영향 커밋
    pub last_affected_commits: Vec<GitCommit>,
    /// 영향 버전 범위
    pub affected_versions: Vec<AffectedVersion>,
}

/// CPE 2.3 분해 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cpe {
    /// CPE 명세 버전 (예: "2.3")
    pub cpe_version: String,
    /// 종류 (a: 애플리케이션, o: 운영체제, h: 하드웨어)
    pub part: String,
    /// 벤더
    pub vendor: String,
    /// 제품
    pub product: String,
    /// 버전
    pub version: String,
    /// 업데이트
    pub update: String,
    /// 에디션
    pub edition: String,
    /// 언어
    pub language: String,
    /// 소프트웨어 에디션
    pub sw_edition: String,
    /// 대상 소프트웨어
    pub target_sw: String,
    /// 대상 하드웨어
    pub target_hw: String,
    /// 기타
    pub other: String,
}
