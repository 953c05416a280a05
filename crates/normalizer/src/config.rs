//! 정규화 설정
//!
//! [`NormalizerConfig`]는 core의 [`NormalizerSection`](ironcve_core::config::NormalizerSection)에서
//! 파생되며, 저장소 해석기와 버전 추출기를 구성하는 데 사용됩니다.
//!
//! # 사용 예시
//!
//! ```
//! use ironcve_normalizer::NormalizerConfig;
//!
//! // 기본값으로 생성
//! let config = NormalizerConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! use ironcve_normalizer::NormalizerConfigBuilder;
//!
//! let config = NormalizerConfigBuilder::new()
//!     .extra_denylist(vec!["https://github.com/acme/advisories".to_owned()])
//!     .description_fallback(false)
//!     .build()
//!     .unwrap();
//! ```

use ironcve_core::config::validate_extra_denylist;
use ironcve_core::error::ConfigError;
use serde::{Deserialize, Serialize};

use crate::error::NormalizerError;

/// 정규화 설정
///
/// # 필드
///
/// - **extra_denylist**: 내장 거부 목록에 더해 거부할 저장소 URL 접두사
/// - **description_fallback**: 구조화 매처가 비었을 때 설명문 추출 여부
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// 추가 거부 접두사
    pub extra_denylist: Vec<String>,
    /// 설명문 기반 버전 추출 활성화
    pub description_fallback: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            extra_denylist: Vec::new(),
            description_fallback: true,
        }
    }
}

impl NormalizerConfig {
    /// core의 `NormalizerSection`에서 정규화 설정을 생성합니다.
    pub fn from_core(core: &ironcve_core::config::NormalizerSection) -> Self {
        Self {
            extra_denylist: core.extra_denylist.clone(),
            description_fallback: core.description_fallback,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// 규칙은 core의 [`validate_extra_denylist`]와 같습니다.
    pub fn validate(&self) -> Result<(), NormalizerError> {
        validate_extra_denylist(&self.extra_denylist).map_err(|e| match e {
            ConfigError::InvalidValue { field, reason } => NormalizerError::Config { field, reason },
            other => NormalizerError::Config {
                field: "normalizer.extra_denylist".to_owned(),
                reason: other.to_string(),
            },
        })
    }
}

/// [`NormalizerConfig`] 빌더
///
/// 빌드 시 유효성 검증을 수행합니다.
#[derive(Default)]
pub struct NormalizerConfigBuilder {
    config: NormalizerConfig,
}

impl NormalizerConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 추가 거부 접두사를 설정합니다.
    pub fn extra_denylist(mut self, prefixes: Vec<String>) -> Self {
        self.config.extra_denylist = prefixes;
        self
    }

    /// 설명문 기반 추출 여부를 설정합니다.
    pub fn description_fallback(mut self, enabled: bool) -> Self {
        self.config.description_fallback = enabled;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `NormalizerError::Config` 반환
    pub fn build(self) -> Result<NormalizerConfig, NormalizerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
