//! CEF 인코더
//!
//! 구조화 이벤트를 `CEF:0|...|키=값 ...` 한 줄로 조립합니다.
//! 헤더 다섯 칸은 보간 템플릿으로 만들고, 비면 기본값으로 채웁니다.
//! 확장부는 설정된 필드 목록 순서대로, 값이 있는 필드만 내보냅니다.

use std::sync::Arc;
use std::time::Instant;

use chrono::SecondsFormat;

use cefbridge_core::codec::EventEncoder;
use cefbridge_core::error::CefBridgeError;
use cefbridge_core::event::{Event, FieldPath, FieldValue};
use cefbridge_core::metrics as m;

use crate::config::{
    CefCodecConfig, DEFAULT_NAME, DEFAULT_PRODUCT, DEFAULT_SIGNATURE, DEFAULT_VENDOR,
    DEFAULT_VERSION,
};
use crate::error::CefCodecError;
use crate::escape::{sanitize_extension_key, sanitize_extension_value, sanitize_header_field};
use crate::interpolate::Template;
use crate::mapping::MappingTable;
use crate::severity::SeverityNormalizer;

/// 설정 필드 하나의 인코딩 준비 상태
struct EncodeField {
    /// 설정에 적힌 원래 필드 문자열 (출력 키 해석에 사용)
    raw: String,
    /// 이벤트 조회용으로 파싱된 경로
    path: FieldPath,
}

/// CEF 텍스트 메시지 인코더
pub struct CefEncoder {
    vendor: Template,
    product: Template,
    version: Template,
    signature: Template,
    name: Template,
    severity_template: Template,
    severity: SeverityNormalizer,
    fields: Vec<EncodeField>,
    mapping: Arc<MappingTable>,
    delimiter: String,
}

impl CefEncoder {
    /// 설정으로부터 인코더를 생성한다.
    pub fn new(config: CefCodecConfig) -> Result<Self, CefCodecError> {
        let mapping = Arc::new(MappingTable::new(
            config.mode,
            config.device,
            config.reverse_mapping,
        )?);
        Self::with_mapping(config, mapping)
    }

    /// 이미 구축된 매핑 테이블을 공유해 인코더를 생성한다.
    pub fn with_mapping(
        config: CefCodecConfig,
        mapping: Arc<MappingTable>,
    ) -> Result<Self, CefCodecError> {
        config.validate()?;
        let fields = config
            .fields
            .iter()
            .map(|field| {
                FieldPath::parse(field)
                    .map(|path| EncodeField {
                        raw: field.clone(),
                        path,
                    })
                    .map_err(|e| CefCodecError::Config {
                        field: field.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            vendor: Template::parse(&config.vendor)?,
            product: Template::parse(&config.product)?,
            version: Template::parse(&config.version)?,
            signature: Template::parse(&config.signature)?,
            name: Template::parse(&config.name)?,
            severity_template: Template::parse(&config.severity)?,
            severity: SeverityNormalizer::default(),
            fields,
            mapping,
            delimiter: config.delimiter,
        })
    }

    /// 인코더가 사용하는 매핑 테이블
    pub fn mapping(&self) -> &Arc<MappingTable> {
        &self.mapping
    }

    /// 이벤트를 CEF 메시지 한 줄로 인코딩한다.
    pub fn encode(&self, event: &Event) -> Result<String, CefCodecError> {
        let start = Instant::now();
        match self.try_encode(event) {
            Ok(message) => {
                metrics::counter!(m::CODEC_MESSAGES_ENCODED_TOTAL).increment(1);
                metrics::histogram!(m::CODEC_ENCODE_DURATION_SECONDS, m::LABEL_RESULT => "ok")
                    .record(start.elapsed().as_secs_f64());
                Ok(message)
            }
            Err(err) => {
                metrics::counter!(m::CODEC_ENCODE_FAILURES_TOTAL).increment(1);
                metrics::histogram!(m::CODEC_ENCODE_DURATION_SECONDS, m::LABEL_RESULT => "error")
                    .record(start.elapsed().as_secs_f64());
                Err(err)
            }
        }
    }

    fn try_encode(&self, event: &Event) -> Result<String, CefCodecError> {
        let vendor = self.header_field(&self.vendor, DEFAULT_VENDOR, event);
        let product = self.header_field(&self.product, DEFAULT_PRODUCT, event);
        let version = self.header_field(&self.version, DEFAULT_VERSION, event);
        let signature = self.header_field(&self.signature, DEFAULT_SIGNATURE, event);
        let name = self.header_field(&self.name, DEFAULT_NAME, event);

        let severity_raw = sanitize_header_field(&self.severity_template.render(event));
        let severity = self.severity.normalize(severity_raw.trim());

        let mut pairs = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let Some(value) = event.get(&field.path) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            let rendered = match value {
                // 시각은 신뢰하는 고정 포맷이라 그대로 내보낸다
                FieldValue::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::Millis, true),
                composite if composite.is_composite() => {
                    let json = serde_json::to_string(composite).map_err(|e| {
                        CefCodecError::Serialize {
                            reason: e.to_string(),
                        }
                    })?;
                    sanitize_extension_value(&json)
                }
                scalar => sanitize_extension_value(&scalar.to_string()),
            };
            let key = self.mapping.encode_key(&field.raw).unwrap_or(&field.raw);
            let key = sanitize_extension_key(key);
            pairs.push(format!("{key}={rendered}"));
        }
        let extension = pairs.join(" ");

        Ok(format!(
            "CEF:0|{vendor}|{product}|{version}|{signature}|{name}|{severity}|{extension}{}",
            self.delimiter
        ))
    }

    /// 템플릿을 렌더링하고 sanitize한 뒤, 비어 있으면 기본값을 쓴다.
    fn header_field(&self, template: &Template, default: &str, event: &Event) -> String {
        let rendered = sanitize_header_field(&template.render(event));
        if rendered.is_empty() {
            default.to_string()
        } else {
            rendered
        }
    }
}

impl EventEncoder for CefEncoder {
    fn format_name(&self) -> &str {
        "cef"
    }

    fn encode(&self, event: &Event) -> Result<String, CefBridgeError> {
        Ok(CefEncoder::encode(self, event)?)
    }
}
