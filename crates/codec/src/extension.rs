//! CEF 확장부 스캐너
//!
//! 확장부는 `key=value` 쌍이 공백으로 이어지는 구역이지만, 값 안의
//! 공백은 이스케이프 없이 그대로 올 수 있습니다. 공백 구간 바로 뒤에
//! 유효한 `key=` 가 시작될 때만 값이 끝난 것으로 판단합니다.
//! 키 문법: 단어 문자 1개 이상, 선택적으로 `.하위키` 반복,
//! 선택적으로 꼬리 `[N]` 인덱스, 바로 뒤에 `=`.

use regex::Regex;

use crate::error::CefCodecError;

/// 키 문법. 슬라이스 선두에 앵커되어 있어 임의 위치 탐색에 쓰지 않는다.
const EXTENSION_KEY_PATTERN: &str =
    r"^[0-9A-Za-z_]+(?:\.[^\s=.|\\\[\]]+)*(?:\[[0-9]+\])?";

/// 확장부를 키/원시값 쌍의 나열로 잘라내는 스캐너
///
/// 반환되는 값은 이스케이프가 풀리지 않은 원문 그대로이며,
/// 등장 순서가 보존됩니다. 중복 키 처리(마지막 값 승리)는
/// 호출 측의 덮어쓰기 삽입에 맡깁니다.
pub struct ExtensionScanner {
    key_pattern: Regex,
}

impl ExtensionScanner {
    /// 스캐너를 생성한다. 키 패턴 컴파일에 실패하면 에러를 반환한다.
    pub fn new() -> Result<Self, CefCodecError> {
        let key_pattern =
            Regex::new(EXTENSION_KEY_PATTERN).map_err(|e| CefCodecError::Config {
                field: "extension key pattern".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { key_pattern })
    }

    /// 확장 텍스트를 (키, 원시값) 쌍으로 잘라낸다.
    ///
    /// 선두/꼬리 공백은 먼저 제거한다. 키 문법에 맞지 않는 텍스트는
    /// 다음 키가 나올 때까지 건너뛴다. 값 꼬리의 공백은 버린다.
    pub fn scan(&self, extension: &str) -> Vec<(String, String)> {
        let text = extension.trim();
        let mut pairs = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let Some((key, value_start)) = self.match_key_at(text, pos) else {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
                continue;
            };
            let value_end = self.scan_value(text, value_start);
            pairs.push((
                key.to_string(),
                text[value_start..value_end].to_string(),
            ));
            pos = value_end;
        }

        pairs
    }

    /// `pos` 위치에서 `키=` 가 시작하면 (키, 값 시작 위치)를 반환한다.
    fn match_key_at<'a>(&self, text: &'a str, pos: usize) -> Option<(&'a str, usize)> {
        let found = self.key_pattern.find(&text[pos..])?;
        let after_key = pos + found.end();
        if text[after_key..].starts_with('=') {
            Some((found.as_str(), after_key + 1))
        } else {
            None
        }
    }

    /// 값의 끝(꼬리 공백 제외) 위치를 반환한다.
    ///
    /// 공백이 아닌 구간은 항상 값에 속한다. 공백 구간은 그 끝에서
    /// 유효한 `키=` 가 시작되지 않을 때만 값에 포함된다.
    fn scan_value(&self, text: &str, start: usize) -> usize {
        let mut cursor = start;
        let mut value_end = start;

        while cursor < text.len() {
            let run = &text[cursor..];
            let non_ws = run
                .find(|c: char| c.is_whitespace())
                .unwrap_or(run.len());
            cursor += non_ws;
            value_end = cursor;
            if cursor >= text.len() {
                break;
            }

            let ws_run = &text[cursor..];
            let ws = ws_run
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(ws_run.len());
            let after_ws = cursor + ws;
            if after_ws >= text.len() {
                break;
            }
            if self.match_key_at(text, after_ws).is_some() {
                break;
            }
            cursor = after_ws;
        }

        value_end
    }
}
