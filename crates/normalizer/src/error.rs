//! 정규화 에러 타입
//!
//! [`NormalizerError`]는 정규화 크레이트에서 발생할 수 있는 모든 에러를 나타냅니다.
//! 모든 에러는 값 수준의 실패이며, 호출자가 로그 후 건너뛰는 것을 전제로 합니다.
//! `From<NormalizerError> for IronCveError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **URL 해석**: `MalformedUrl`, `Denylisted`, `UnsupportedUrl`
//! - **CPE 파싱**: `MalformedIdentifier`
//! - **버전 정규화**: `UnsupportedVersion`
//! - **설정**: `Config`

use ironcve_core::error::{ConfigError, IronCveError, NormalizeError};

/// 정규화 도메인 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizerError {
    /// URL 파싱 실패
    #[error("malformed url: {url}: {reason}")]
    MalformedUrl {
        /// 입력 URL
        url: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 거부 목록(정규식 또는 접두사)에 걸린 URL
    #[error("denylisted url: {url}: {reason}")]
    Denylisted {
        /// 입력 URL
        url: String,
        /// 매칭된 규칙
        reason: String,
    },

    /// 어떤 호스트 규칙에도 맞지 않는 URL
    #[error("unsupported url: {0}")]
    UnsupportedUrl(String),

    /// `cpe:` 접두사가 없거나 unbinding 실패
    #[error("malformed identifier: '{identifier}': {reason}")]
    MalformedIdentifier {
        /// 입력 식별자
        identifier: String,
        /// 실패 사유 (unbinding 실패 시 내부 원인)
        reason: String,
    },

    /// 숫자/프리릴리스 구성요소가 없는 버전
    #[error("unsupported version: '{0}'")]
    UnsupportedVersion(String),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<NormalizerError> for IronCveError {
    fn from(err: NormalizerError) -> Self {
        match err {
            NormalizerError::MalformedUrl { url, reason } => {
                IronCveError::Normalize(NormalizeError::MalformedUrl(format!("{url}: {reason}")))
            }
            NormalizerError::Denylisted { url, reason } => {
                IronCveError::Normalize(NormalizeError::Denylisted(format!("{url}: {reason}")))
            }
            NormalizerError::UnsupportedUrl(url) => {
                IronCveError::Normalize(NormalizeError::UnsupportedUrl(url))
            }
            NormalizerError::MalformedIdentifier { identifier, reason } => IronCveError::Normalize(
                NormalizeError::MalformedIdentifier(format!("'{identifier}': {reason}")),
            ),
            NormalizerError::UnsupportedVersion(version) => {
                IronCveError::Normalize(NormalizeError::UnsupportedVersion(version))
            }
            NormalizerError::Config { field, reason } => {
                IronCveError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}
