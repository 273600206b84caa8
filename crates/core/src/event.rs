//! 구조화 이벤트 모델 — 디코딩 결과와 인코딩 입력의 기본 단위
//!
//! [`Event`]는 필드명에서 [`FieldValue`] 트리로의 매핑이며,
//! 중첩 필드는 [`FieldPath`]로 주소를 지정합니다.
//! 디코더는 이벤트를 생성하고, 인코더는 이벤트를 읽기 전용으로 소비합니다.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// --- 필드명 상수 ---

/// 파싱 실패 시 원문이 저장되는 필드명
pub const MESSAGE_FIELD: &str = "message";
/// 태그 배열 필드명
pub const TAGS_FIELD: &str = "tags";
/// 이벤트 타임스탬프 필드명
pub const TIMESTAMP_FIELD: &str = "@timestamp";

/// 필드 경로의 한 구간
///
/// `source.ip`는 `Key("source"), Key("ip")`로,
/// `items[0]`은 `Key("items"), Index(0)`으로 표현됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// 객체 필드명
    Key(String),
    /// 배열 인덱스
    Index(usize),
}

/// 파싱된 필드 경로
///
/// 점(`.`)은 객체 중첩, 대괄호(`[n]`)는 배열 인덱스를 의미합니다.
/// 첫 구간은 항상 [`PathSegment::Key`]입니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// 경로 문자열을 파싱합니다. 점은 중첩으로, `[n]`은 인덱스로 해석합니다.
    ///
    /// 빈 경로, 빈 구간명, 숫자가 아닌 인덱스, 닫히지 않은 대괄호는
    /// 거부됩니다. `@timestamp`처럼 `@`로 시작하는 구간명은 허용됩니다.
    pub fn parse(path: &str) -> Result<Self, ConfigError> {
        if path.is_empty() {
            return Err(invalid_path(path, "empty path"));
        }
        let mut segments = Vec::new();
        let mut rest = path;
        loop {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            let name = &rest[..end];
            if name.is_empty() {
                return Err(invalid_path(path, "empty segment name"));
            }
            segments.push(PathSegment::Key(name.to_owned()));
            rest = &rest[end..];
            while let Some(after_open) = rest.strip_prefix('[') {
                let Some(close) = after_open.find(']') else {
                    return Err(invalid_path(path, "unclosed index bracket"));
                };
                let index: usize = after_open[..close]
                    .parse()
                    .map_err(|_| invalid_path(path, "index is not a number"))?;
                segments.push(PathSegment::Index(index));
                rest = &after_open[close + 1..];
            }
            if rest.is_empty() {
                break;
            }
            let Some(after_dot) = rest.strip_prefix('.') else {
                return Err(invalid_path(path, "unexpected character after index"));
            };
            if after_dot.is_empty() {
                return Err(invalid_path(path, "trailing dot"));
            }
            rest = after_dot;
        }
        Ok(Self { segments })
    }

    /// 키 문자열을 점 분리 없이 리터럴 경로로 변환합니다.
    ///
    /// 사전에 없는 확장 키를 그대로 보존할 때 사용합니다. 점은 필드명의
    /// 일부로 남고, 말미의 `[n]`만 배열 인덱스로 재해석됩니다.
    /// `items[0]` → `Key("items"), Index(0)`, `ad.foo` → `Key("ad.foo")`.
    pub fn from_literal_key(key: &str) -> Self {
        if let Some(open) = key.rfind('[') {
            if open > 0 && key.ends_with(']') {
                let digits = &key[open + 1..key.len() - 1];
                if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                    if let Ok(index) = digits.parse::<usize>() {
                        return Self {
                            segments: vec![
                                PathSegment::Key(key[..open].to_owned()),
                                PathSegment::Index(index),
                            ],
                        };
                    }
                }
            }
        }
        Self {
            segments: vec![PathSegment::Key(key.to_owned())],
        }
    }

    /// 경로 구간 슬라이스
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(name) => {
                    if position > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

fn invalid_path(path: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: format!("field path '{path}'"),
        reason: reason.to_owned(),
    }
}

/// 이벤트 필드 값 — 태그드 유니온
///
/// JSON 직렬화 시 태그 없이 값 그대로 표현됩니다.
/// 역직렬화 시 정수로 떨어지는 숫자는 [`Integer`](FieldValue::Integer),
/// 나머지 숫자는 [`Float`](FieldValue::Float)이 되며, 문자열은 항상
/// [`Text`](FieldValue::Text)로 남습니다 (타임스탬프 자동 승격 없음).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// 값 없음
    Null,
    /// 불리언
    Boolean(bool),
    /// 정수
    Integer(i64),
    /// 부동소수
    Float(f64),
    /// 문자열
    Text(String),
    /// 정규화된 타임스탬프 — RFC3339 밀리초 정밀도로 직렬화
    #[serde(serialize_with = "serialize_timestamp")]
    Timestamp(DateTime<Utc>),
    /// 배열
    Array(Vec<FieldValue>),
    /// 중첩 객체
    Object(BTreeMap<String, FieldValue>),
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl FieldValue {
    /// 값 종류 이름 (로깅/에러 메시지용)
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Array(_) => "array",
            FieldValue::Object(_) => "object",
        }
    }

    /// 문자열 값이면 참조를 반환합니다.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// 타임스탬프 값이면 반환합니다.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(value) => Some(*value),
            _ => None,
        }
    }

    /// 값 없음 여부
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// 배열 또는 객체 여부 (인코딩 시 JSON으로 직렬화되는 값)
    pub fn is_composite(&self) -> bool {
        matches!(self, FieldValue::Array(_) | FieldValue::Object(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Boolean(value) => write!(f, "{value}"),
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Float(value) => write!(f, "{value}"),
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Timestamp(value) => {
                f.write_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            FieldValue::Array(_) | FieldValue::Object(_) => match serde_json::to_string(self) {
                Ok(json) => f.write_str(&json),
                Err(_) => f.write_str("<unserializable>"),
            },
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

/// 구조화 이벤트 — 필드명에서 값 트리로의 매핑
///
/// JSON 객체 하나와 1:1로 직렬화됩니다. 필드 순서는 이름순으로
/// 결정적입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
    fields: BTreeMap<String, FieldValue>,
}

impl Event {
    /// 빈 이벤트를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 경로의 값을 조회합니다. 경로 도중 타입이 맞지 않으면 `None`.
    pub fn get(&self, path: &FieldPath) -> Option<&FieldValue> {
        let (first, rest) = path.segments().split_first()?;
        let PathSegment::Key(name) = first else {
            return None;
        };
        let mut current = self.fields.get(name)?;
        for segment in rest {
            current = match (segment, current) {
                (PathSegment::Key(key), FieldValue::Object(map)) => map.get(key)?,
                (PathSegment::Index(index), FieldValue::Array(items)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// 경로에 값을 기록합니다. 항상 성공합니다.
    ///
    /// 중간 경로가 없으면 다음 구간에 맞는 컨테이너(객체/배열)를
    /// 생성하고, 타입이 다른 중간 값은 교체합니다. 배열 인덱스가
    /// 길이를 넘으면 `Null`로 채웁니다. 같은 경로의 기존 값은
    /// 덮어씁니다.
    pub fn insert(&mut self, path: &FieldPath, value: FieldValue) {
        let Some((first, rest)) = path.segments().split_first() else {
            return;
        };
        let PathSegment::Key(name) = first else {
            return;
        };
        let slot = self
            .fields
            .entry(name.clone())
            .or_insert(FieldValue::Null);
        insert_at(slot, rest, value);
    }

    /// 최상위 필드에 값을 기록합니다. 점이 있어도 분리하지 않습니다.
    pub fn insert_flat(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// `tags` 배열에 태그를 추가합니다.
    ///
    /// 필드가 없으면 배열을 만들고, 배열이 아닌 기존 값은
    /// 기존 값을 첫 원소로 하는 배열로 감쌉니다.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = FieldValue::Text(tag.into());
        match self.fields.get_mut(TAGS_FIELD) {
            Some(FieldValue::Array(items)) => items.push(tag),
            Some(other) => {
                let existing = std::mem::replace(other, FieldValue::Null);
                *other = FieldValue::Array(vec![existing, tag]);
            }
            None => {
                self.fields
                    .insert(TAGS_FIELD.to_owned(), FieldValue::Array(vec![tag]));
            }
        }
    }

    /// 경로에 값이 존재하는지 확인합니다.
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.get(path).is_some()
    }

    /// 최상위 필드 맵
    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// 최상위 필드 개수
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 필드가 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event[{} fields]", self.fields.len())
    }
}

/// 슬롯 이하에 남은 구간을 따라 내려가며 값을 기록합니다.
fn insert_at(slot: &mut FieldValue, segments: &[PathSegment], value: FieldValue) {
    let Some((segment, rest)) = segments.split_first() else {
        *slot = value;
        return;
    };
    match segment {
        PathSegment::Key(key) => {
            if !matches!(slot, FieldValue::Object(_)) {
                *slot = FieldValue::Object(BTreeMap::new());
            }
            if let FieldValue::Object(map) = slot {
                insert_at(map.entry(key.clone()).or_insert(FieldValue::Null), rest, value);
            }
        }
        PathSegment::Index(index) => {
            if !matches!(slot, FieldValue::Array(_)) {
                *slot = FieldValue::Array(Vec::new());
            }
            if let FieldValue::Array(items) = slot {
                if items.len() <= *index {
                    items.resize(*index + 1, FieldValue::Null);
                }
                insert_at(&mut items[*index], rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn path(text: &str) -> FieldPath {
        FieldPath::parse(text).unwrap()
    }

    #[test]
    fn field_path_parse_single_key() {
        let parsed = path("message");
        assert_eq!(parsed.segments(), &[PathSegment::Key("message".to_owned())]);
    }

    #[test]
    fn field_path_parse_nested() {
        let parsed = path("source.geo.city");
        assert_eq!(parsed.segments().len(), 3);
        assert_eq!(parsed.to_string(), "source.geo.city");
    }

    #[test]
    fn field_path_parse_with_index() {
        let parsed = path("items[2]");
        assert_eq!(
            parsed.segments(),
            &[PathSegment::Key("items".to_owned()), PathSegment::Index(2)]
        );
    }

    #[test]
    fn field_path_parse_index_then_key() {
        let parsed = path("hosts[0].name");
        assert_eq!(parsed.segments().len(), 3);
        assert_eq!(parsed.to_string(), "hosts[0].name");
    }

    #[test]
    fn field_path_parse_at_prefix() {
        let parsed = path("@timestamp");
        assert_eq!(
            parsed.segments(),
            &[PathSegment::Key("@timestamp".to_owned())]
        );
    }

    #[test]
    fn field_path_parse_rejects_empty() {
        assert!(FieldPath::parse("").is_err());
    }

    #[test]
    fn field_path_parse_rejects_leading_index() {
        assert!(FieldPath::parse("[0]").is_err());
    }

    #[test]
    fn field_path_parse_rejects_empty_segment() {
        assert!(FieldPath::parse("a..b").is_err());
        assert!(FieldPath::parse("a.").is_err());
    }

    #[test]
    fn field_path_parse_rejects_bad_index() {
        assert!(FieldPath::parse("a[x]").is_err());
        assert!(FieldPath::parse("a[").is_err());
        assert!(FieldPath::parse("a[0]b").is_err());
    }

    #[test]
    fn literal_key_keeps_dots() {
        let parsed = FieldPath::from_literal_key("ad.destinationHosts");
        assert_eq!(
            parsed.segments(),
            &[PathSegment::Key("ad.destinationHosts".to_owned())]
        );
    }

    #[test]
    fn literal_key_rewrites_trailing_index() {
        let parsed = FieldPath::from_literal_key("items[0]");
        assert_eq!(
            parsed.segments(),
            &[PathSegment::Key("items".to_owned()), PathSegment::Index(0)]
        );
    }

    #[test]
    fn literal_key_ignores_non_numeric_bracket() {
        let parsed = FieldPath::from_literal_key("items[abc]");
        assert_eq!(
            parsed.segments(),
            &[PathSegment::Key("items[abc]".to_owned())]
        );
    }

    #[test]
    fn literal_key_bracket_only_stays_key() {
        let parsed = FieldPath::from_literal_key("[0]");
        assert_eq!(parsed.segments(), &[PathSegment::Key("[0]".to_owned())]);
    }

    #[test]
    fn insert_and_get_top_level() {
        let mut event = Event::new();
        event.insert(&path("message"), FieldValue::from("hello"));
        assert_eq!(
            event.get(&path("message")),
            Some(&FieldValue::Text("hello".to_owned()))
        );
    }

    #[test]
    fn insert_nested_creates_objects() {
        let mut event = Event::new();
        event.insert(&path("source.geo.city"), FieldValue::from("Seoul"));
        let source = event.get(&path("source")).unwrap();
        assert!(matches!(source, FieldValue::Object(_)));
        assert_eq!(
            event.get(&path("source.geo.city")).unwrap().as_text(),
            Some("Seoul")
        );
    }

    #[test]
    fn insert_index_pads_with_null() {
        let mut event = Event::new();
        event.insert(&path("items[2]"), FieldValue::from("third"));
        assert!(event.get(&path("items[0]")).unwrap().is_null());
        assert!(event.get(&path("items[1]")).unwrap().is_null());
        assert_eq!(event.get(&path("items[2]")).unwrap().as_text(), Some("third"));
    }

    #[test]
    fn insert_overwrites_existing() {
        let mut event = Event::new();
        event.insert(&path("count"), FieldValue::Integer(1));
        event.insert(&path("count"), FieldValue::Integer(2));
        assert_eq!(event.get(&path("count")), Some(&FieldValue::Integer(2)));
        assert_eq!(event.len(), 1);
    }

    #[test]
    fn insert_replaces_scalar_with_object() {
        let mut event = Event::new();
        event.insert(&path("source"), FieldValue::from("plain"));
        event.insert(&path("source.ip"), FieldValue::from("10.0.0.1"));
        assert_eq!(
            event.get(&path("source.ip")).unwrap().as_text(),
            Some("10.0.0.1")
        );
    }

    #[test]
    fn get_missing_returns_none() {
        let event = Event::new();
        assert_eq!(event.get(&path("absent")), None);
        assert!(!event.contains(&path("absent.deeper")));
    }

    #[test]
    fn get_type_mismatch_returns_none() {
        let mut event = Event::new();
        event.insert(&path("message"), FieldValue::from("text"));
        assert_eq!(event.get(&path("message.inner")), None);
        assert_eq!(event.get(&path("message[0]")), None);
    }

    #[test]
    fn add_tag_creates_array() {
        let mut event = Event::new();
        event.add_tag("_cefparsefailure");
        assert_eq!(
            event.get(&path("tags")),
            Some(&FieldValue::Array(vec![FieldValue::Text(
                "_cefparsefailure".to_owned()
            )]))
        );
    }

    #[test]
    fn add_tag_appends_to_existing_array() {
        let mut event = Event::new();
        event.add_tag("first");
        event.add_tag("second");
        let FieldValue::Array(items) = event.get(&path("tags")).unwrap() else {
            panic!("tags must be an array");
        };
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn add_tag_wraps_scalar() {
        let mut event = Event::new();
        event.insert(&path("tags"), FieldValue::from("existing"));
        event.add_tag("new");
        let FieldValue::Array(items) = event.get(&path("tags")).unwrap() else {
            panic!("tags must be an array");
        };
        assert_eq!(items[0].as_text(), Some("existing"));
        assert_eq!(items[1].as_text(), Some("new"));
    }

    #[test]
    fn field_value_display_scalars() {
        assert_eq!(FieldValue::from("abc").to_string(), "abc");
        assert_eq!(FieldValue::Integer(42).to_string(), "42");
        assert_eq!(FieldValue::Boolean(true).to_string(), "true");
        assert_eq!(FieldValue::Null.to_string(), "null");
    }

    #[test]
    fn field_value_display_timestamp_millis() {
        let instant = Utc.with_ymd_and_hms(2019, 6, 21, 10, 55, 6).unwrap();
        let value = FieldValue::Timestamp(instant);
        assert_eq!(value.to_string(), "2019-06-21T10:55:06.000Z");
    }

    #[test]
    fn field_value_display_composite_is_json() {
        let value = FieldValue::Array(vec![FieldValue::Integer(1), FieldValue::Integer(2)]);
        assert_eq!(value.to_string(), "[1,2]");
    }

    #[test]
    fn event_serializes_to_json_object() {
        let mut event = Event::new();
        event.insert(&path("source.ip"), FieldValue::from("10.0.0.1"));
        event.insert(&path("count"), FieldValue::Integer(3));
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"count":3,"source":{"ip":"10.0.0.1"}}"#);
    }

    #[test]
    fn event_serializes_timestamp_with_millis() {
        let mut event = Event::new();
        let instant = Utc.with_ymd_and_hms(2019, 6, 21, 10, 55, 6).unwrap();
        event.insert(&path("@timestamp"), FieldValue::Timestamp(instant));
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"@timestamp":"2019-06-21T10:55:06.000Z"}"#);
    }

    #[test]
    fn event_deserializes_numbers_by_kind() {
        let event: Event = serde_json::from_str(r#"{"int":5,"float":5.5}"#).unwrap();
        assert_eq!(event.get(&path("int")), Some(&FieldValue::Integer(5)));
        assert_eq!(event.get(&path("float")), Some(&FieldValue::Float(5.5)));
    }

    #[test]
    fn event_deserializes_strings_as_text() {
        // 타임스탬프 형태의 문자열도 자동 승격 없이 Text로 남아야 한다
        let event: Event = serde_json::from_str(r#"{"when":"2019-06-21T10:55:06.000Z"}"#).unwrap();
        assert!(matches!(
            event.get(&path("when")),
            Some(FieldValue::Text(_))
        ));
    }

    #[test]
    fn event_json_roundtrip_preserves_structure() {
        let mut event = Event::new();
        event.insert(&path("nested.items[1]"), FieldValue::Integer(7));
        event.add_tag("t1");
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn event_display_shows_field_count() {
        let mut event = Event::new();
        event.insert_flat("a", FieldValue::Integer(1));
        event.insert_flat("b", FieldValue::Integer(2));
        assert_eq!(event.to_string(), "Event[2 fields]");
    }

    #[test]
    fn events_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<Event>();
        assert_send_sync::<FieldValue>();
        assert_send_sync::<FieldPath>();
    }
}
