//! 헤더 필드 템플릿 보간
//!
//! 설정의 헤더 필드는 `%{field.path}` 자리표시자를 섞어 쓸 수 있는
//! 템플릿입니다. 구축 시점에 리터럴과 필드 참조로 분해해 두고,
//! 인코딩마다 이벤트 값으로 치환합니다. 없는 필드는 빈 문자열이
//! 됩니다(빈 결과는 호출 측에서 기본값으로 대체).

use chrono::SecondsFormat;

use cefbridge_core::event::{Event, FieldPath, FieldValue};

use crate::error::CefCodecError;

#[derive(Debug, Clone)]
enum Part {
    Literal(String),
    Field(FieldPath),
}

/// 파싱이 끝난 보간 템플릿
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    parts: Vec<Part>,
}

impl Template {
    /// 템플릿 문자열을 파싱한다.
    ///
    /// `%{` 뒤에 닫는 `}` 가 없거나 참조 경로가 비정상이면 에러다.
    /// `%` 단독은 리터럴이다.
    pub fn parse(template: &str) -> Result<Self, CefCodecError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find("%{") {
            literal.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find('}') else {
                return Err(template_error(template, "unclosed '%{'"));
            };
            let path_text = &after_open[..close];
            let path = FieldPath::parse(path_text)
                .map_err(|e| template_error(template, &e.to_string()))?;
            if !literal.is_empty() {
                parts.push(Part::Literal(std::mem::take(&mut literal)));
            }
            parts.push(Part::Field(path));
            rest = &after_open[close + 1..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            parts,
        })
    }

    /// 원본 템플릿 문자열
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 이벤트 값으로 자리표시자를 치환한 문자열을 만든다.
    ///
    /// 스칼라는 표시 형식 그대로, 시각은 RFC3339(밀리초), 복합 값은
    /// JSON 문자열로 들어간다. 없는 필드는 빈 문자열이다.
    pub fn render(&self, event: &Event) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Field(path) => {
                    if let Some(value) = event.get(path) {
                        render_value(&mut out, value);
                    }
                }
            }
        }
        out
    }
}

fn render_value(out: &mut String, value: &FieldValue) {
    match value {
        FieldValue::Null => {}
        FieldValue::Timestamp(ts) => {
            out.push_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        composite if composite.is_composite() => match serde_json::to_string(composite) {
            Ok(json) => out.push_str(&json),
            Err(_) => out.push_str("<unserializable>"),
        },
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn template_error(template: &str, reason: &str) -> CefCodecError {
    CefCodecError::Template {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}
