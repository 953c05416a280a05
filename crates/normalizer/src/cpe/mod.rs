//! CPE 파서 -- CPE 2.3 formatted string을 필드 단위로 분해
//!
//! [`parse_cpe`]는 `cpe:` 접두사를 확인한 뒤 [`unbind::unbind_fs`]에 분해를 맡깁니다.
//! vendor/product/version 필드만 인용을 해제하며, 나머지 필드는
//! 인용된 형태를 그대로 유지합니다.
//!
//! # 예시
//!
//! ```
//! use ironcve_normalizer::parse_cpe;
//!
//! let cpe = parse_cpe("cpe:2.3:a:gnu:glibc:2.35:*:*:*:*:*:*:*").unwrap();
//! assert_eq!(cpe.vendor, "gnu");
//! assert_eq!(cpe.version, "2.35");
//! assert_eq!(cpe.update, "ANY");
//! ```

pub mod unbind;

use ironcve_core::types::CveItem;

use crate::error::NormalizerError;
use crate::types::Cpe;

/// WFN 인용을 해제합니다 (`\x` -> `x`).
///
/// 인용된 백슬래시(`\\`)는 백슬래시 하나로 남습니다.
pub fn remove_quoting(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                result.push(next);
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// CPE 문자열을 [`Cpe`]로 분해합니다.
///
/// # Errors
///
/// - `MalformedIdentifier`: `cpe:` 접두사가 없거나 unbinding 실패
pub fn parse_cpe(formatted: &str) -> Result<Cpe, NormalizerError> {
    if !formatted.starts_with("cpe:") {
        return Err(NormalizerError::MalformedIdentifier {
            identifier: formatted.to_owned(),
            reason: "does not have expected 'cpe:' prefix".to_owned(),
        });
    }

    let wfn = unbind::unbind_fs(formatted).map_err(|e| NormalizerError::MalformedIdentifier {
        identifier: formatted.to_owned(),
        reason: e.to_string(),
    })?;

    Ok(Cpe {
        cpe_version: formatted.split(':').nth(1).unwrap_or_default().to_owned(),
        part: wfn.get_string("part"),
        vendor: remove_quoting(&wfn.get_string("vendor")),
        product: remove_quoting(&wfn.get_string("product")),
        version: remove_quoting(&wfn.get_string("version")),
        update: wfn.get_string("update"),
        edition: wfn.get_string("edition"),
        language: wfn.get_string("language"),
        sw_edition: wfn.get_string("sw_edition"),
        target_sw: wfn.get_string("target_sw"),
        target_hw: wfn.get_string("target_hw"),
        other: wfn.get_string("other"),
    })
}

/// 레코드의 모든 매치 항목 CPE 문자열을 노드 순서대로 반환합니다.
pub fn cpes(item: &CveItem) -> Vec<&str> {
    item.configurations
        .nodes
        .iter()
        .flat_map(|node| node.cpe_match.iter())
        .map(|m| m.cpe23_uri.as_str())
        .collect()
}
