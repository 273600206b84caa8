//! 타임스탬프 정규화
//!
//! 이벤트 타임스탬프로 들어오는 값은 세 갈래입니다: 이미 시각 타입인
//! 값(통과), 날짜 문자열(포맷 추론 파싱), 숫자(Unix epoch). epoch는
//! 자릿수로 초/밀리초를 구분합니다. 그 외 타입은 에러입니다.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};

use cefbridge_core::event::FieldValue;

use crate::error::CefCodecError;

/// 이 값(11자리)을 넘는 epoch는 밀리초로 해석한다.
const EPOCH_MILLIS_CUTOFF: i64 = 99_999_999_999;

/// 연도가 포함된 CEF 날짜 포맷 (UTC로 가정)
const FORMATS_WITH_YEAR: &[&str] = &["%b %d %Y %H:%M:%S%.f"];

/// 연도와 오프셋이 포함된 CEF 날짜 포맷
const FORMATS_WITH_YEAR_TZ: &[&str] = &["%b %d %Y %H:%M:%S%.f %z"];

/// 연도가 없는 CEF 날짜 포맷. 현재 연도를 붙여 파싱한다.
const FORMATS_WITHOUT_YEAR: &[&str] = &["%b %d %H:%M:%S%.f"];

/// 타임스탬프 값 정규화기
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampNormalizer;

impl TimestampNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// 필드 값을 UTC 시각으로 정규화한다.
    pub fn normalize(&self, value: &FieldValue) -> Result<DateTime<Utc>, CefCodecError> {
        match value {
            FieldValue::Timestamp(ts) => Ok(*ts),
            FieldValue::Text(s) => self.normalize_text(s),
            FieldValue::Integer(n) => from_epoch_i64(*n).ok_or_else(|| CefCodecError::Timestamp {
                value: n.to_string(),
                reason: "epoch value out of range".to_string(),
            }),
            FieldValue::Float(f) => from_epoch_f64(*f).ok_or_else(|| CefCodecError::Timestamp {
                value: f.to_string(),
                reason: "epoch value out of range".to_string(),
            }),
            other => Err(CefCodecError::Timestamp {
                value: other.to_string(),
                reason: format!("unsupported value type: {}", other.type_name()),
            }),
        }
    }

    /// 문자열을 UTC 시각으로 정규화한다.
    ///
    /// 해석 순서: 숫자만이면 epoch, RFC3339, 연도 포함 포맷,
    /// 오프셋 포함 포맷, 연도 없는 포맷(현재 연도로 보충).
    pub fn normalize_text(&self, text: &str) -> Result<DateTime<Utc>, CefCodecError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(self.parse_error(text, "empty value"));
        }

        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return trimmed
                .parse::<i64>()
                .ok()
                .and_then(from_epoch_i64)
                .ok_or_else(|| self.parse_error(text, "epoch value out of range"));
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(ts.with_timezone(&Utc));
        }

        for format in FORMATS_WITH_YEAR {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Utc.from_utc_datetime(&naive));
            }
        }

        for format in FORMATS_WITH_YEAR_TZ {
            if let Ok(ts) = DateTime::parse_from_str(trimmed, format) {
                return Ok(ts.with_timezone(&Utc));
            }
        }

        let year = Utc::now().year();
        let with_year = format!("{year} {trimmed}");
        for format in FORMATS_WITHOUT_YEAR {
            let padded = format!("%Y {format}");
            if let Ok(naive) = NaiveDateTime::parse_from_str(&with_year, &padded) {
                return Ok(Utc.from_utc_datetime(&naive));
            }
        }

        Err(self.parse_error(text, "no known format matched"))
    }

    fn parse_error(&self, value: &str, reason: &str) -> CefCodecError {
        CefCodecError::Timestamp {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// 자릿수 기준으로 초/밀리초를 구분해 epoch를 해석한다.
fn from_epoch_i64(value: i64) -> Option<DateTime<Utc>> {
    if value > EPOCH_MILLIS_CUTOFF {
        Utc.timestamp_millis_opt(value).single()
    } else {
        Utc.timestamp_opt(value, 0).single()
    }
}

fn from_epoch_f64(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }
    if value > EPOCH_MILLIS_CUTOFF as f64 {
        Utc.timestamp_millis_opt(value as i64).single()
    } else {
        Utc.timestamp_millis_opt((value * 1000.0) as i64).single()
    }
}
