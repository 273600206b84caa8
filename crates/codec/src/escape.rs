//! CEF 이스케이프 처리
//!
//! 헤더와 확장부는 서로 다른 이스케이프 규칙을 사용합니다.
//! 디코딩 방향(unescape)은 `\|`, `\=`, `\\`만 해석하고 그 외의
//! 백슬래시 시퀀스는 원문 그대로 보존합니다. 인코딩 방향(sanitize)은
//! 구분 문자를 이스케이프하고 개행을 각 섹션 규칙에 맞게 치환합니다.

/// 이스케이프된 구분 문자와 백슬래시를 복원한다.
///
/// `\<special>` -> `<special>`, `\\` -> `\`. 그 외 시퀀스는 그대로 둔다.
fn unescape(value: &str, special: char) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some(next) if next == special => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// 헤더 필드 디코딩: `\|` -> `|`, `\\` -> `\`
pub fn unescape_header_field(value: &str) -> String {
    unescape(value, '|')
}

/// 확장 값 디코딩: `\=` -> `=`, `\\` -> `\`
pub fn unescape_extension_value(value: &str) -> String {
    unescape(value, '=')
}

/// 헤더 필드 인코딩: `\` -> `\\`, `|` -> `\|`, 개행은 공백 하나로 접는다
///
/// CRLF는 한 쌍으로 취급해 공백 하나가 된다. 헤더에는 개행이
/// 올 수 없으므로 정보 손실을 감수하고 치환한다.
pub fn sanitize_header_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '|' => out.push_str("\\|"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

/// 확장 값 인코딩: `\` -> `\\`, `=` -> `\=`, 개행은 리터럴 `\n` 두 글자로 치환
///
/// CRLF는 한 쌍으로 취급한다. 디코딩 방향은 리터럴 `\n`을 되돌리지
/// 않으므로 개행 치환은 단방향이다.
pub fn sanitize_extension_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '=' => out.push_str("\\="),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// 확장 키 인코딩: ASCII 영숫자가 아닌 문자는 모두 제거
pub fn sanitize_extension_key(key: &str) -> String {
    key.chars().filter(char::is_ascii_alphanumeric).collect()
}
