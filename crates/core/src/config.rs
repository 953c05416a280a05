//! 설정 관리 -- ironcve.toml 파싱 및 런타임 설정
//!
//! [`IronCveConfig`]는 모든 크레이트의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`IRONCVE_GENERAL_LOG_LEVEL=debug` 형식)
//! 3. 설정 파일 (`ironcve.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), ironcve_core::error::IronCveError> {
//! use ironcve_core::config::IronCveConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = IronCveConfig::load("ironcve.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = IronCveConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, IronCveError};

/// ironcve 통합 설정
///
/// `ironcve.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IronCveConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 정규화 설정
    #[serde(default)]
    pub normalizer: NormalizerSection,
}

impl IronCveConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, IronCveError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값을 사용하여 로드합니다.
    ///
    /// CLI처럼 설정 파일이 선택 사항인 경우에 사용합니다.
    /// 파일이 존재하지만 파싱에 실패하면 에러를 반환합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, IronCveError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(IronCveError::Config(ConfigError::FileNotFound { .. })) => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, IronCveError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IronCveError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                IronCveError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, IronCveError> {
        toml::from_str(toml_str).map_err(|e| {
            IronCveError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `IRONCVE_{SECTION}_{FIELD}`
    /// 예: `IRONCVE_NORMALIZER_EXTRA_DENYLIST=https://github.com/a/b,https://github.com/c/d`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "IRONCVE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "IRONCVE_GENERAL_LOG_FORMAT");

        // Normalizer
        override_csv(
            &mut self.normalizer.extra_denylist,
            "IRONCVE_NORMALIZER_EXTRA_DENYLIST",
        );
        override_bool(
            &mut self.normalizer.description_fallback,
            "IRONCVE_NORMALIZER_DESCRIPTION_FALLBACK",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), IronCveError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        validate_extra_denylist(&self.normalizer.extra_denylist)?;

        Ok(())
    }
}

/// 추가 거부 접두사 최대 개수
pub const MAX_EXTRA_DENYLIST: usize = 10_000;

/// 추가 거부 접두사 목록을 검증합니다.
///
/// 최대 [`MAX_EXTRA_DENYLIST`]개, 각 항목은 절대 http(s) URL이어야 합니다.
/// 그래야 prefix 비교가 의미 있습니다.
pub fn validate_extra_denylist(prefixes: &[String]) -> Result<(), ConfigError> {
    if prefixes.len() > MAX_EXTRA_DENYLIST {
        return Err(ConfigError::InvalidValue {
            field: "normalizer.extra_denylist".to_owned(),
            reason: format!("at most {MAX_EXTRA_DENYLIST} entries allowed"),
        });
    }

    for prefix in prefixes {
        let parsed = url::Url::parse(prefix).map_err(|e| ConfigError::InvalidValue {
            field: "normalizer.extra_denylist".to_owned(),
            reason: format!("'{prefix}' is not a valid url: {e}"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "normalizer.extra_denylist".to_owned(),
                reason: format!("'{prefix}' must use http or https"),
            });
        }
    }

    Ok(())
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 정규화 설정 섹션
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerSection {
    /// 내장 거부 목록에 추가할 저장소 URL 접두사
    pub extra_denylist: Vec<String>,
    /// 구조화 데이터가 없을 때 설명문에서 버전 범위를 추출할지 여부
    pub description_fallback: bool,
}

impl Default for NormalizerSection {
    fn default() -> Self {
        Self {
            extra_denylist: Vec::new(),
            description_fallback: true,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}
