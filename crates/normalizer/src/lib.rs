#![doc = include_str!("../README.md")]
//!
//! # 모듈 구조
//!
//! - [`error`]: 도메인 에러 타입 (`NormalizerError`)
//! - [`config`]: 정규화 설정 (`NormalizerConfig`, 빌더)
//! - [`types`]: 결과 값 타입 (`GitCommit`, `AffectedVersion`, `VersionInfo`, `Cpe`)
//! - [`denylist`]: 내장 거부 정규식과 저장소 접두사 목록
//! - [`repo`]: 저장소 URL 정규화 (`RepoResolver`, 호스트 규칙 테이블)
//! - [`commit`]: 커밋 식별자 추출
//! - [`reference`]: 참조 URL -> `GitCommit` 결합
//! - [`versions`]: 영향 버전 범위 추출 (`VersionExtractor`)
//! - [`cpe`]: CPE 2.3 파싱과 formatted string unbinding
//! - [`normalize`]: 버전 문자열 정규화
//!
//! # 데이터 흐름
//!
//! ```text
//! reference_data[].url --> RepoResolver --+
//!                                         +--> GitCommit --> VersionInfo.fix_commits
//!                          commit() ------+
//!
//! configurations.nodes --> 구조화 단계 --(없음)--> 설명문 단계 --> affected_versions + notes
//!                              ^                       ^
//!                              +---- ValidVersions ----+
//! ```

pub mod commit;
pub mod config;
pub mod cpe;
pub mod denylist;
pub mod error;
pub mod normalize;
pub mod reference;
pub mod repo;
pub mod types;
pub mod versions;

// --- Public API Re-exports ---

// URL 해석
pub use commit::commit;
pub use reference::{extract_git_commit, extract_git_commit_with, extract_git_commits};
pub use repo::{RepoResolver, repo};

// 설정
pub use config::{NormalizerConfig, NormalizerConfigBuilder};

// 에러
pub use error::NormalizerError;

// 타입
pub use types::{AffectedVersion, Cpe, GitCommit, VersionInfo};

// 버전 범위
pub use versions::{SuccessorError, ValidVersions, VersionExtractor, extract_version_info};

// CPE / 버전 정규화
pub use cpe::{cpes, parse_cpe};
pub use normalize::normalize_version;
