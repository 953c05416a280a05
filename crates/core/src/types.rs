//! CVE 레코드 스키마 -- NVD JSON 1.1 피드의 부분 모델
//!
//! 레코드 스키마 자체는 외부 피드가 소유합니다. 여기서는 정규화에
//! 필요한 필드(참조 URL, 버전 매처 트리, 설명문, CVE ID)만 모델링하며,
//! 누락된 필드는 모두 기본값(빈 문자열/빈 목록)으로 역직렬화됩니다.
//!
//! # JSON 형식
//!
//! ```json
//! {
//!   "cve": {
//!     "CVE_data_meta": { "ID": "CVE-2022-1234" },
//!     "references": { "reference_data": [{ "url": "https://github.com/o/r/commit/abc" }] },
//!     "description": { "description_data": [{ "lang": "en", "value": "..." }] }
//!   },
//!   "configurations": {
//!     "nodes": [{
//!       "operator": "OR",
//!       "cpe_match": [{
//!         "vulnerable": true,
//!         "cpe23Uri": "cpe:2.3:a:vendor:product:*:*:*:*:*:*:*:*",
//!         "versionEndExcluding": "1.2.3"
//!       }]
//!     }]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// 레코드 JSON 최대 크기 (256 MB, 연간 NVD 피드 전체를 수용)
pub const MAX_RECORD_SIZE: usize = 256 * 1024 * 1024;

/// NVD 피드 파일 (`{"CVE_Items": [...]}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CveFeed {
    /// 피드에 포함된 CVE 항목
    #[serde(rename = "CVE_Items", default)]
    pub items: Vec<CveItem>,
}

impl CveFeed {
    /// JSON 문자열에서 CVE 항목 목록을 파싱합니다.
    ///
    /// 피드 형식(`CVE_Items` 배열)과 단일 `CveItem` 형식을 모두 허용합니다.
    pub fn parse_items(json: &str, source_name: &str) -> Result<Vec<CveItem>, RecordError> {
        if json.len() > MAX_RECORD_SIZE {
            return Err(RecordError::TooLarge {
                size: json.len(),
                max: MAX_RECORD_SIZE,
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| RecordError::ParseFailed {
                source_name: source_name.to_owned(),
                reason: e.to_string(),
            })?;

        let result = if value.get("CVE_Items").is_some() {
            serde_json::from_value::<CveFeed>(value).map(|feed| feed.items)
        } else {
            serde_json::from_value::<CveItem>(value).map(|item| vec![item])
        };

        result.map_err(|e| RecordError::ParseFailed {
            source_name: source_name.to_owned(),
            reason: e.to_string(),
        })
    }
}

/// 단일 CVE 항목
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CveItem {
    /// CVE 본문
    #[serde(default)]
    pub cve: Cve,
    /// 영향받는 구성 (버전 매처 트리)
    #[serde(default)]
    pub configurations: Configurations,
}

impl CveItem {
    /// CVE ID를 반환합니다 (로깅 컨텍스트용).
    pub fn id(&self) -> &str {
        &self.cve.cve_data_meta.id
    }

    /// 참조 URL을 레코드 순서대로 반환합니다.
    pub fn reference_urls(&self) -> impl Iterator<Item = &str> {
        self.cve
            .references
            .reference_data
            .iter()
            .map(|r| r.url.as_str())
    }

    /// 첫 번째 영어 설명문을 반환합니다. 없으면 빈 문자열입니다.
    pub fn english_description(&self) -> &str {
        self.cve
            .description
            .description_data
            .iter()
            .find(|d| d.lang == "en")
            .map(|d| d.value.as_str())
            .unwrap_or("")
    }
}

/// CVE 본문
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cve {
    /// 메타데이터 (ID)
    #[serde(rename = "CVE_data_meta", default)]
    pub cve_data_meta: CveDataMeta,
    /// 참조 목록
    #[serde(default)]
    pub references: References,
    /// 설명문 목록
    #[serde(default)]
    pub description: Description,
}

/// CVE 메타데이터
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CveDataMeta {
    /// CVE ID (예: CVE-2022-1234)
    #[serde(rename = "ID", default)]
    pub id: String,
}

/// 참조 목록 래퍼
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct References {
    /// 참조 항목
    #[serde(default)]
    pub reference_data: Vec<Reference>,
}

/// 참조 항목
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reference {
    /// 참조 URL
    #[serde(default)]
    pub url: String,
    /// 참조 이름
    #[serde(default)]
    pub name: String,
    /// 참조 출처
    #[serde(default)]
    pub refsource: String,
    /// 태그 (예: "Patch", "Third Party Advisory")
    #[serde(default)]
    pub tags: Vec<String>,
}

/// 설명문 목록 래퍼
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Description {
    /// 언어별 설명문
    #[serde(default)]
    pub description_data: Vec<LangString>,
}

/// 언어 태그가 붙은 문자열
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LangString {
    /// 언어 코드 (예: "en")
    #[serde(default)]
    pub lang: String,
    /// 본문
    #[serde(default)]
    pub value: String,
}

/// 영향받는 구성
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Configurations {
    /// 매처 노드 목록
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// 매처 노드
///
/// `operator`가 `"OR"`인 노드의 `cpe_match`만 버전 범위 추출에 사용됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Node {
    /// 논리 연산자 ("OR" / "AND")
    #[serde(default)]
    pub operator: String,
    /// 하위 노드
    #[serde(default)]
    pub children: Vec<Node>,
    /// 매치 항목
    #[serde(default)]
    pub cpe_match: Vec<CpeMatch>,
}

/// 매치 항목
///
/// 버전 경계 필드는 비어 있으면 "없음"을 뜻합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpeMatch {
    /// 취약 여부
    #[serde(default)]
    pub vulnerable: bool,
    /// CPE 2.3 formatted string
    #[serde(rename = "cpe23Uri", default)]
    pub cpe23_uri: String,
    /// 포함 시작 경계
    #[serde(default)]
    pub version_start_including: String,
    /// 제외 시작 경계
    #[serde(default)]
    pub version_start_excluding: String,
    /// 포함 끝 경계
    #[serde(default)]
    pub version_end_including: String,
    /// 제외 끝 경계
    #[serde(default)]
    pub version_end_excluding: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_ITEM: &str = r#"{
        "cve": {
            "CVE_data_meta": { "ID": "CVE-2022-0001" },
            "references": { "reference_data": [
                { "url": "https://github.com/o/r/commit/abc", "tags": ["Patch"] },
                { "url": "https://example.com/advisory" }
            ]},
            "description": { "description_data": [
                { "lang": "es", "value": "hola" },
                { "lang": "en", "value": "hello" }
            ]}
        },
        "configurations": { "nodes": [{
            "operator": "OR",
            "cpe_match": [{
                "vulnerable": true,
                "cpe23Uri": "cpe:2.3:a:o:r:*:*:*:*:*:*:*:*",
                "versionStartIncluding": "1.0",
                "versionEndExcluding": "1.5"
            }]
        }]}
    }"#;

    #[test]
    fn parses_single_item() {
        let items = CveFeed::parse_items(SINGLE_ITEM, "item.json").unwrap();
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.id(), "CVE-2022-0001");
        assert_eq!(item.reference_urls().count(), 2);
        assert_eq!(item.english_description(), "hello");

        let m = &item.configurations.nodes[0].cpe_match[0];
        assert!(m.vulnerable);
        assert_eq!(m.version_start_including, "1.0");
        assert_eq!(m.version_end_excluding, "1.5");
        assert!(m.version_end_including.is_empty());
    }

    #[test]
    fn parses_feed() {
        let feed = format!(r#"{{"CVE_data_type": "CVE", "CVE_Items": [{SINGLE_ITEM}, {SINGLE_ITEM}]}}"#);
        let items = CveFeed::parse_items(&feed, "feed.json").unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn missing_fields_default() {
        let items = CveFeed::parse_items("{}", "empty.json").unwrap();
        assert_eq!(items[0].id(), "");
        assert_eq!(items[0].english_description(), "");
        assert!(items[0].configurations.nodes.is_empty());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = CveFeed::parse_items("{not json", "bad.json").unwrap_err();
        assert!(matches!(err, RecordError::ParseFailed { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn wrong_shape_is_parse_error() {
        let err = CveFeed::parse_items(r#"{"CVE_Items": 3}"#, "bad.json").unwrap_err();
        assert!(matches!(err, RecordError::ParseFailed { .. }));
    }
}
