//! CEF 디코더
//!
//! 헤더 스캔 -> syslog 분리 -> 프리픽스 제거 -> 확장부 스캔 ->
//! 필드 매핑/정규화 순서로 한 메시지를 구조화 이벤트로 바꿉니다.
//! 어느 단계에서 실패하든 호출자에게 에러를 돌려주지 않고, 원문과
//! 실패 태그를 담은 폴백 이벤트를 만들어 반환합니다.

use std::str;
use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use cefbridge_core::codec::EventDecoder;
use cefbridge_core::event::{Event, FieldPath, FieldValue, MESSAGE_FIELD, TIMESTAMP_FIELD};
use cefbridge_core::metrics as m;

use crate::config::CefCodecConfig;
use crate::error::CefCodecError;
use crate::escape::unescape_extension_value;
use crate::extension::ExtensionScanner;
use crate::header::{self, HEADER_FIELD_NAMES};
use crate::mapping::MappingTable;
use crate::timestamp::TimestampNormalizer;

/// 디코딩에 실패한 폴백 이벤트에 붙는 태그
pub const PARSE_FAILURE_TAG: &str = "_cefparsefailure";

/// CEF 텍스트 메시지 디코더
///
/// 생성 시점에 매핑 테이블과 스캐너를 구축하고, 이후의 `decode`
/// 호출은 공유 가능한 읽기 전용 상태만 사용합니다.
pub struct CefDecoder {
    mapping: Arc<MappingTable>,
    extensions: ExtensionScanner,
    timestamps: TimestampNormalizer,
    timestamp_path: FieldPath,
    raw_data_path: Option<FieldPath>,
    max_message_size: usize,
}

impl CefDecoder {
    /// 설정으로부터 디코더를 생성한다.
    pub fn new(config: CefCodecConfig) -> Result<Self, CefCodecError> {
        let mapping = Arc::new(MappingTable::new(
            config.mode,
            config.device,
            config.reverse_mapping,
        )?);
        Self::with_mapping(config, mapping)
    }

    /// 이미 구축된 매핑 테이블을 공유해 디코더를 생성한다.
    pub fn with_mapping(
        config: CefCodecConfig,
        mapping: Arc<MappingTable>,
    ) -> Result<Self, CefCodecError> {
        config.validate()?;
        let raw_data_path = match &config.raw_data_field {
            Some(field) => Some(parse_path(field)?),
            None => None,
        };
        Ok(Self {
            mapping,
            extensions: ExtensionScanner::new()?,
            timestamps: TimestampNormalizer::new(),
            timestamp_path: parse_path(TIMESTAMP_FIELD)?,
            raw_data_path,
            max_message_size: config.max_message_size,
        })
    }

    /// 디코더가 사용하는 매핑 테이블
    pub fn mapping(&self) -> &Arc<MappingTable> {
        &self.mapping
    }

    /// 한 메시지를 이벤트로 디코딩한다. 실패 시 폴백 이벤트를 반환한다.
    pub fn decode(&self, raw: &[u8]) -> Event {
        let start = Instant::now();
        match self.try_decode(raw) {
            Ok(event) => {
                metrics::counter!(m::CODEC_MESSAGES_DECODED_TOTAL).increment(1);
                metrics::histogram!(m::CODEC_DECODE_DURATION_SECONDS, m::LABEL_RESULT => "ok")
                    .record(start.elapsed().as_secs_f64());
                event
            }
            Err(err) => {
                warn!(error = %err, input_len = raw.len(), "cef decode failed, emitting fallback event");
                metrics::counter!(m::CODEC_DECODE_FAILURES_TOTAL).increment(1);
                metrics::histogram!(m::CODEC_DECODE_DURATION_SECONDS, m::LABEL_RESULT => "error")
                    .record(start.elapsed().as_secs_f64());
                self.fallback_event(raw)
            }
        }
    }

    /// 디코딩을 시도하고 실패 원인을 그대로 돌려준다.
    fn try_decode(&self, raw: &[u8]) -> Result<Event, CefCodecError> {
        if raw.len() > self.max_message_size {
            return Err(CefCodecError::TooLarge {
                size: raw.len(),
                max: self.max_message_size,
            });
        }
        let text = str::from_utf8(raw).map_err(|e| CefCodecError::Encoding {
            reason: e.to_string(),
        })?;

        let message = unwrap_quotes(text);
        let (fields, remainder) = header::scan_header(message);
        let mut event = Event::new();

        let mut slots = fields.into_iter();
        if let Some(version_field) = slots.next() {
            let (prefix, version) = header::split_syslog_prefix(&version_field);
            if let Some(prefix) = prefix {
                self.insert_mapped(&mut event, header::SYSLOG_FIELD_NAME, prefix.into());
            }
            let version = header::strip_cef_prefix(version);
            self.insert_mapped(&mut event, HEADER_FIELD_NAMES[0], version.into());
        }
        for (slot, value) in HEADER_FIELD_NAMES[1..].iter().zip(slots) {
            self.insert_mapped(&mut event, slot, FieldValue::Text(value));
        }

        if !remainder.is_empty() && remainder.contains('=') {
            let pairs = self.extensions.scan(remainder);
            metrics::counter!(m::CODEC_EXTENSION_PAIRS_TOTAL).increment(pairs.len() as u64);
            for (key, raw_value) in pairs {
                let value_text = unescape_extension_value(&raw_value);
                let literal;
                let path = match self.mapping.decode_target(&key) {
                    Some(path) => path,
                    None => {
                        literal = FieldPath::from_literal_key(&key);
                        &literal
                    }
                };
                if *path == self.timestamp_path {
                    let ts = self.timestamps.normalize_text(&value_text)?;
                    event.insert(path, FieldValue::Timestamp(ts));
                } else {
                    event.insert(path, FieldValue::Text(value_text));
                }
            }
        }

        if let Some(path) = &self.raw_data_path {
            event.insert(path, text.into());
        }

        Ok(event)
    }

    /// 이름 또는 축약 키를 대상 경로로 풀어 삽입한다. 모르는 이름은
    /// 그대로 리터럴 키가 된다.
    fn insert_mapped(&self, event: &mut Event, name: &str, value: FieldValue) {
        match self.mapping.decode_target(name) {
            Some(path) => event.insert(path, value),
            None => {
                let path = FieldPath::from_literal_key(name);
                event.insert(&path, value);
            }
        }
    }

    fn fallback_event(&self, raw: &[u8]) -> Event {
        let mut event = Event::new();
        event.insert_flat(
            MESSAGE_FIELD,
            FieldValue::Text(String::from_utf8_lossy(raw).into_owned()),
        );
        event.add_tag(PARSE_FAILURE_TAG);
        event
    }
}

impl EventDecoder for CefDecoder {
    fn format_name(&self) -> &str {
        "cef"
    }

    fn decode(&self, raw: &[u8]) -> Event {
        CefDecoder::decode(self, raw)
    }
}

/// 메시지 전체를 감싼 큰따옴표 한 쌍을 벗긴다.
fn unwrap_quotes(message: &str) -> &str {
    if message.len() >= 2 && message.starts_with('"') && message.ends_with('"') {
        &message[1..message.len() - 1]
    } else {
        message
    }
}

fn parse_path(field: &str) -> Result<FieldPath, CefCodecError> {
    FieldPath::parse(field).map_err(|e| CefCodecError::Config {
        field: field.to_string(),
        reason: e.to_string(),
    })
}
