//! 에러 타입 -- 도메인별 에러 정의

/// ironcve 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum IronCveError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 정규화 에러
    #[error("normalize error: {0}")]
    Normalize(#[from] NormalizeError),

    /// CVE 레코드 로딩/파싱 에러
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 정규화 에러
///
/// 정규화 크레이트의 세부 에러가 이 카테고리로 변환됩니다.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// URL 파싱 실패
    #[error("malformed url: {0}")]
    MalformedUrl(String),

    /// 거부 목록에 포함된 URL
    #[error("denylisted url: {0}")]
    Denylisted(String),

    /// 지원하지 않는 URL 형식
    #[error("unsupported url: {0}")]
    UnsupportedUrl(String),

    /// 잘못된 CPE 식별자
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// 정규화할 수 없는 버전 문자열
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),
}

/// CVE 레코드 에러
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// JSON 파싱 실패
    #[error("failed to parse record {source_name}: {reason}")]
    ParseFailed { source_name: String, reason: String },

    /// 입력 데이터 초과
    #[error("record too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },
}
