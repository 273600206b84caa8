//! CEF 헤더 스캐너
//!
//! `CEF:0|vendor|product|version|sigId|name|severity|...` 형태의
//! 고정 7칸 헤더를 이스케이프 인식 파이프 분리로 잘라냅니다.
//! 각 필드는 이스케이프되지 않은 파이프로 *종결*되어야 하며,
//! 종결 파이프가 없으면 그 지점에서 스캔을 멈추고 남은 텍스트를
//! 확장부 후보로 돌려줍니다. 짧은 헤더는 에러가 아닙니다.

use crate::escape::unescape_header_field;

/// 헤더 슬롯 수
pub const HEADER_FIELD_COUNT: usize = 7;

/// 헤더 슬롯의 필드 이름 (선두부터 순서대로)
pub const HEADER_FIELD_NAMES: [&str; HEADER_FIELD_COUNT] = [
    "cefVersion",
    "deviceVendor",
    "deviceProduct",
    "deviceVersion",
    "deviceEventClassId",
    "name",
    "severity",
];

/// 버전 필드에서 분리한 syslog 프리픽스가 저장되는 필드 이름
pub const SYSLOG_FIELD_NAME: &str = "syslog";

/// 메시지 선두에서 최대 7개의 헤더 필드를 잘라낸다.
///
/// 반환값은 (이스케이프 해제된 필드 목록, 소비되지 않은 나머지)이다.
/// 필드는 이스케이프되지 않은 파이프가 나타날 때마다 하나씩 확정되며,
/// 파이프 없이 끝나는 꼬리 텍스트는 슬롯에 배정되지 않고 나머지로 남는다.
pub fn scan_header(input: &str) -> (Vec<String>, &str) {
    let mut fields = Vec::with_capacity(HEADER_FIELD_COUNT);
    let mut field_start = 0;
    let mut consumed = 0;
    let mut escaped = false;

    for (idx, ch) in input.char_indices() {
        if fields.len() == HEADER_FIELD_COUNT {
            break;
        }
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '|' => {
                fields.push(unescape_header_field(&input[field_start..idx]));
                field_start = idx + 1;
                consumed = idx + 1;
            }
            _ => {}
        }
    }

    (fields, &input[consumed..])
}

/// 버전 필드에서 syslog 프리픽스를 분리한다.
///
/// 값에 공백이 있으면 "<syslog 프리픽스> <버전>"으로 해석해
/// *마지막* 공백을 기준으로 나눈다. 공백이 없으면 프리픽스는 없다.
pub fn split_syslog_prefix(version_field: &str) -> (Option<&str>, &str) {
    match version_field.rfind(' ') {
        Some(pos) => (Some(&version_field[..pos]), &version_field[pos + 1..]),
        None => (None, version_field),
    }
}

/// 버전 값 선두의 리터럴 `CEF:` 프리픽스를 제거한다. 대소문자를 구분한다.
pub fn strip_cef_prefix(version_field: &str) -> &str {
    version_field.strip_prefix("CEF:").unwrap_or(version_field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_seven_fields_and_remainder() {
        let input = "CEF:0|Vendor|Product|1.0|100|Intrusion Detected|10|src=1.2.3.4";
        let (fields, rest) = scan_header(input);
        assert_eq!(
            fields,
            vec![
                "CEF:0",
                "Vendor",
                "Product",
                "1.0",
                "100",
                "Intrusion Detected",
                "10",
            ]
        );
        assert_eq!(rest, "src=1.2.3.4");
    }

    #[test]
    fn scans_escaped_pipe_inside_field() {
        let input = r"CEF:0|Ven\|dor|Product|";
        let (fields, rest) = scan_header(input);
        assert_eq!(fields, vec!["CEF:0", "Ven|dor", "Product"]);
        assert_eq!(rest, "");
    }

    #[test]
    fn escaped_backslash_does_not_shield_pipe() {
        // `\\` 는 백슬래시 하나로 해석되고 뒤의 파이프는 구분자다
        let input = r"CEF:0|back\\|Product|";
        let (fields, _) = scan_header(input);
        assert_eq!(fields, vec!["CEF:0", r"back\", "Product"]);
    }

    #[test]
    fn short_header_stops_without_error() {
        let (fields, rest) = scan_header("CEF:0|Vendor|");
        assert_eq!(fields, vec!["CEF:0", "Vendor"]);
        assert_eq!(rest, "");
    }

    #[test]
    fn text_without_trailing_pipe_stays_unconsumed() {
        let (fields, rest) = scan_header("CEF:0|Vendor");
        assert_eq!(fields, vec!["CEF:0"]);
        assert_eq!(rest, "Vendor");
    }

    #[test]
    fn no_pipe_at_all_yields_no_fields() {
        let (fields, rest) = scan_header("plain syslog line");
        assert!(fields.is_empty());
        assert_eq!(rest, "plain syslog line");
    }

    #[test]
    fn empty_fields_are_preserved() {
        let (fields, rest) = scan_header("CEF:0||x|");
        assert_eq!(fields, vec!["CEF:0", "", "x"]);
        assert_eq!(rest, "");
    }

    #[test]
    fn stops_after_seven_fields() {
        let input = "a|b|c|d|e|f|g|h|i";
        let (fields, rest) = scan_header(input);
        assert_eq!(fields.len(), HEADER_FIELD_COUNT);
        assert_eq!(rest, "h|i");
    }

    #[test]
    fn trailing_backslash_is_tolerated() {
        let (fields, rest) = scan_header(r"CEF:0|abc\");
        assert_eq!(fields, vec!["CEF:0"]);
        assert_eq!(rest, r"abc\");
    }

    #[test]
    fn syslog_prefix_splits_on_last_space() {
        let (prefix, version) = split_syslog_prefix("Sep 19 08:26:10 host CEF:0");
        assert_eq!(prefix, Some("Sep 19 08:26:10 host"));
        assert_eq!(version, "CEF:0");
    }

    #[test]
    fn no_space_means_no_syslog_prefix() {
        let (prefix, version) = split_syslog_prefix("CEF:0");
        assert_eq!(prefix, None);
        assert_eq!(version, "CEF:0");
    }

    #[test]
    fn strip_cef_prefix_is_exact() {
        assert_eq!(strip_cef_prefix("CEF:0"), "0");
        assert_eq!(strip_cef_prefix("cef:0"), "cef:0");
        assert_eq!(strip_cef_prefix("0"), "0");
        assert_eq!(strip_cef_prefix(""), "");
    }

    // === Edge Case Tests ===

    #[test]
    fn multibyte_field_content_keeps_boundaries() {
        let (fields, rest) = scan_header("CEF:0|한국어 벤더|제품|rest");
        assert_eq!(fields, vec!["CEF:0", "한국어 벤더", "제품"]);
        assert_eq!(rest, "rest");
    }

    #[test]
    fn empty_input_yields_nothing() {
        let (fields, rest) = scan_header("");
        assert!(fields.is_empty());
        assert_eq!(rest, "");
    }

    #[test]
    fn pipe_only_input_yields_empty_fields() {
        let (fields, rest) = scan_header("|||");
        assert_eq!(fields, vec!["", "", ""]);
        assert_eq!(rest, "");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// 헤더 스캔은 어떤 입력에도 패닉하지 않고 7칸을 넘지 않는다
            #[test]
            fn scan_never_panics(input in ".*") {
                let (fields, _) = scan_header(&input);
                prop_assert!(fields.len() <= HEADER_FIELD_COUNT);
            }

            /// 이스케이프 없는 필드 7개는 순서 그대로 복원된다
            #[test]
            fn plain_fields_roundtrip(
                fields in prop::collection::vec("[^|\\\\]*", 7)
            ) {
                let joined = format!("{}|rest", fields.join("|"));
                let (scanned, rest) = scan_header(&joined);
                prop_assert_eq!(scanned, fields);
                prop_assert_eq!(rest, "rest");
            }
        }
    }
}
