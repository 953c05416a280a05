//! CPE 2.3 formatted string unbinding (NISTIR 7695 6.2.3)
//!
//! `cpe:2.3:part:vendor:product:version:update:edition:language:sw_edition:target_sw:target_hw:other`
//! 형식을 [`WellFormedName`]으로 분해합니다.
//!
//! - `*` -> 논리값 ANY, `-` -> 논리값 NA
//! - 그 외 값은 WFN 인용 규칙(add_quoting)에 따라 특수 문자를 `\`로 인용
//!
//! 인용된 값은 그대로 보관되며, 인용 해제는 호출자가 필드별로 결정합니다.

use std::fmt;

/// formatted string 접두사
const FS_PREFIX: &str = "cpe:2.3:";

/// 접두사 두 개(`cpe`, `2.3`) + 속성 11개
const FS_COMPONENTS: usize = 13;

/// 속성 이름 (formatted string 순서)
pub const ATTRIBUTES: [&str; 11] = [
    "part",
    "vendor",
    "product",
    "version",
    "update",
    "edition",
    "language",
    "sw_edition",
    "target_sw",
    "target_hw",
    "other",
];

/// unbinding 실패
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnbindError {
    #[error("formatted string must start with 'cpe:2.3:'")]
    MissingPrefix,

    #[error("expected 13 components, found {0}")]
    ComponentCount(usize),

    #[error("attribute '{0}' is empty")]
    EmptyComponent(&'static str),

    #[error("invalid part '{0}': expected a, o, h or *")]
    InvalidPart(String),

    #[error("attribute '{attribute}': {reason}")]
    Quoting {
        attribute: &'static str,
        reason: String,
    },
}

/// WFN 속성 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WfnValue {
    /// 임의 값 (`*`)
    Any,
    /// 해당 없음 (`-`)
    Na,
    /// 인용 규칙이 적용된 문자열
    Value(String),
}

impl fmt::Display for WfnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WfnValue::Any => f.write_str("ANY"),
            WfnValue::Na => f.write_str("NA"),
            WfnValue::Value(v) => f.write_str(v),
        }
    }
}

/// Well-formed CPE name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellFormedName {
    values: [WfnValue; 11],
}

impl WellFormedName {
    /// 속성 이름으로 값을 조회합니다.
    pub fn get(&self, attribute: &str) -> Option<&WfnValue> {
        ATTRIBUTES
            .iter()
            .position(|a| *a == attribute)
            .map(|idx| &self.values[idx])
    }

    /// 속성 값을 문자열로 반환합니다. 알 수 없는 속성은 빈 문자열입니다.
    pub fn get_string(&self, attribute: &str) -> String {
        self.get(attribute).map(ToString::to_string).unwrap_or_default()
    }
}

/// 인용되지 않은 `:`로 나눕니다.
fn split_components(fs: &str) -> Vec<&str> {
    let mut components = Vec::with_capacity(FS_COMPONENTS);
    let mut start = 0;
    let mut escaped = false;
    for (idx, c) in fs.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ':' => {
                components.push(&fs[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    components.push(&fs[start..]);
    components
}

/// formatted string 값에 WFN 인용을 적용합니다.
///
/// - 영숫자와 `_`는 그대로
/// - 이미 인용된 `\x`는 그대로
/// - `*`는 맨 앞이나 맨 뒤에만
/// - `?`는 앞쪽 또는 뒤쪽 연속 구간에만
/// - 나머지 문자는 `\`로 인용
pub fn add_quoting(value: &str) -> Result<String, String> {
    let chars: Vec<char> = value.chars().collect();
    let last = chars.len().saturating_sub(1);
    let mut result = String::with_capacity(value.len());
    let mut idx = 0;
    let mut embedded = false;

    while idx < chars.len() {
        let c = chars[idx];
        if !c.is_ascii_graphic() {
            return Err(format!("invalid character {c:?}"));
        }

        if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
            embedded = true;
            idx += 1;
            continue;
        }

        if c == '\\' {
            let Some(&next) = chars.get(idx + 1) else {
                return Err("dangling escape".to_owned());
            };
            result.push(c);
            result.push(next);
            embedded = true;
            idx += 2;
            continue;
        }

        if c == '*' {
            if idx == 0 || idx == last {
                result.push(c);
                embedded = true;
                idx += 1;
                continue;
            }
            return Err("'*' is only allowed at the beginning or end".to_owned());
        }

        if c == '?' {
            let leading_run = !embedded && idx > 0 && chars[idx - 1] == '?';
            let trailing_run = embedded && chars.get(idx + 1) == Some(&'?');
            if idx == 0 || idx == last || leading_run || trailing_run {
                result.push(c);
                embedded = false;
                idx += 1;
                continue;
            }
            return Err("'?' must be part of a leading or trailing run".to_owned());
        }

        result.push('\\');
        result.push(c);
        embedded = true;
        idx += 1;
    }

    Ok(result)
}

fn unbind_value(attribute: &'static str, value: &str) -> Result<WfnValue, UnbindError> {
    match value {
        "" => Err(UnbindError::EmptyComponent(attribute)),
        "*" => Ok(WfnValue::Any),
        "-" => Ok(WfnValue::Na),
        _ => add_quoting(value)
            .map(WfnValue::Value)
            .map_err(|reason| UnbindError::Quoting { attribute, reason }),
    }
}

/// formatted string을 WFN으로 분해합니다.
pub fn unbind_fs(fs: &str) -> Result<WellFormedName, UnbindError> {
    let has_prefix = fs
        .get(..FS_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(FS_PREFIX));
    if !has_prefix {
        return Err(UnbindError::MissingPrefix);
    }

    let components = split_components(fs);
    if components.len() != FS_COMPONENTS {
        return Err(UnbindError::ComponentCount(components.len()));
    }

    let mut values: [WfnValue; 11] = std::array::from_fn(|_| WfnValue::Any);
    for (slot, (attribute, raw)) in values
        .iter_mut()
        .zip(ATTRIBUTES.iter().zip(&components[2..]))
    {
        *slot = unbind_value(*attribute, raw)?;
    }

    match &values[0] {
        WfnValue::Any => {}
        WfnValue::Value(part) if matches!(part.as_str(), "a" | "o" | "h") => {}
        other => return Err(UnbindError::InvalidPart(other.to_string())),
    }

    Ok(WellFormedName { values })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbind_application() {
        let wfn = unbind_fs("cpe:2.3:a:microsoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*")
            .unwrap();
        assert_eq!(wfn.get_string("part"), "a");
        assert_eq!(wfn.get_string("vendor"), "microsoft");
        assert_eq!(wfn.get_string("product"), "internet_explorer");
        assert_eq!(wfn.get_string("version"), "8\\.0\\.6001");
        assert_eq!(wfn.get_string("update"), "beta");
        assert_eq!(wfn.get("edition"), Some(&WfnValue::Any));
        assert_eq!(wfn.get_string("other"), "ANY");
    }

    #[test]
    fn logical_values() {
        let wfn = unbind_fs("cpe:2.3:o:linux:linux_kernel:-:*:*:*:*:*:*:*").unwrap();
        assert_eq!(wfn.get("version"), Some(&WfnValue::Na));
        assert_eq!(wfn.get_string("version"), "NA");
    }

    #[test]
    fn escaped_colon_stays_in_component() {
        let wfn = unbind_fs(r"cpe:2.3:a:foo\:bar:baz:1.0:*:*:*:*:*:*:*").unwrap();
        assert_eq!(wfn.get_string("vendor"), r"foo\:bar");
        assert_eq!(wfn.get_string("product"), "baz");
    }

    #[test]
    fn unknown_attribute() {
        let wfn = unbind_fs("cpe:2.3:h:cisco:router:*:*:*:*:*:*:*:*").unwrap();
        assert!(wfn.get("color").is_none());
        assert_eq!(wfn.get_string("color"), "");
    }

    #[test]
    fn rejects_bad_prefix() {
        assert_eq!(
            unbind_fs("cpe:/a:vendor:product:1.0"),
            Err(UnbindError::MissingPrefix)
        );
        assert_eq!(unbind_fs("cpe"), Err(UnbindError::MissingPrefix));
    }

    #[test]
    fn rejects_wrong_component_count() {
        assert_eq!(
            unbind_fs("cpe:2.3:a:vendor:product"),
            Err(UnbindError::ComponentCount(5))
        );
    }

    #[test]
    fn rejects_empty_component() {
        assert_eq!(
            unbind_fs("cpe:2.3:a::product:*:*:*:*:*:*:*:*"),
            Err(UnbindError::EmptyComponent("vendor"))
        );
    }

    #[test]
    fn rejects_invalid_part() {
        assert_eq!(
            unbind_fs("cpe:2.3:x:vendor:product:*:*:*:*:*:*:*:*"),
            Err(UnbindError::InvalidPart("x".to_owned()))
        );
    }

    #[test]
    fn quoting_rules() {
        assert_eq!(add_quoting("1.2.3").unwrap(), r"1\.2\.3");
        assert_eq!(add_quoting("foo_bar").unwrap(), "foo_bar");
        assert_eq!(add_quoting(r"a\!b").unwrap(), r"a\!b");
        assert_eq!(add_quoting("*foo*").unwrap(), "*foo*");
        assert_eq!(add_quoting("??foo").unwrap(), "??foo");
        assert_eq!(add_quoting("foo??").unwrap(), "foo??");
        assert!(add_quoting("fo*o").is_err());
        assert!(add_quoting("f?oo").is_err());
        assert!(add_quoting("foo\\").is_err());
        assert!(add_quoting("foo bar").is_err());
    }
}
