//! 코덱 설정
//!
//! [`cefbridge_core::config::CefBridgeConfig`]의 `[codec]` 섹션을
//! 타입이 있는 형태로 옮긴 설정입니다. 문자열로 들어온 장비 역할과
//! 호환 모드는 열거형으로 바뀌고, 검증은 필드 경로와 템플릿 문법까지
//! 확인합니다. 디코더/인코더는 이 구조체로부터 생성됩니다.

use std::fmt;

use serde::{Deserialize, Serialize};

use cefbridge_core::config::CefBridgeConfig;
use cefbridge_core::event::FieldPath;

use crate::error::CefCodecError;
use crate::interpolate::Template;
use crate::severity::DEFAULT_SEVERITY;

/// 헤더 기본값. 템플릿이 빈 문자열로 렌더링되면 이 값이 들어간다.
pub const DEFAULT_VENDOR: &str = "CefBridge";
pub const DEFAULT_PRODUCT: &str = "Codec";
pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_SIGNATURE: &str = "CefBridge";
pub const DEFAULT_NAME: &str = "CefBridge";

/// 입력 크기 제한 기본값 (256KB)
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 256 * 1024;

/// 장비 필드가 가리키는 대상 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceRole {
    /// 관측 장비(센서, 방화벽 등) 자신
    #[default]
    Observer,
    /// 관측 대상 호스트
    Host,
}

impl DeviceRole {
    /// ECS 대상 경로에 들어가는 프리픽스
    pub fn prefix(&self) -> &'static str {
        match self {
            DeviceRole::Observer => "observer",
            DeviceRole::Host => "host",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "host" => DeviceRole::Host,
            _ => DeviceRole::default(),
        }
    }
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// 필드 이름 호환 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompatMode {
    /// 구조화된 ECS 스타일 경로 (`source.ip`)
    #[default]
    Ecs,
    /// 평평한 전체 이름 (`sourceAddress`)
    Legacy,
}

impl CompatMode {
    pub fn name(&self) -> &'static str {
        match self {
            CompatMode::Ecs => "ecs",
            CompatMode::Legacy => "legacy",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "legacy" => CompatMode::Legacy,
            _ => CompatMode::default(),
        }
    }
}

impl fmt::Display for CompatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// CEF 코덱 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CefCodecConfig {
    /// 인코딩 헤더의 벤더 템플릿
    pub vendor: String,
    /// 인코딩 헤더의 제품 템플릿
    pub product: String,
    /// 인코딩 헤더의 제품 버전 템플릿
    pub version: String,
    /// 인코딩 헤더의 시그니처 ID 템플릿
    pub signature: String,
    /// 인코딩 헤더의 이벤트 이름 템플릿
    pub name: String,
    /// 인코딩 헤더의 심각도 템플릿
    pub severity: String,
    /// 인코딩 시 확장부에 내보낼 필드 경로 목록
    pub fields: Vec<String>,
    /// 축약 키(`src`)로 내보낼지 여부. 꺼져 있으면 전체 이름.
    pub reverse_mapping: bool,
    /// 인코딩된 메시지 끝에 붙는 구분 문자열
    pub delimiter: String,
    /// 디코딩 성공 시 원문을 보존할 필드 경로
    pub raw_data_field: Option<String>,
    /// 장비 필드의 대상 역할
    pub device: DeviceRole,
    /// 필드 이름 호환 모드
    pub mode: CompatMode,
    /// 디코딩 입력 크기 제한 (바이트)
    pub max_message_size: usize,
}

impl Default for CefCodecConfig {
    fn default() -> Self {
        Self {
            vendor: DEFAULT_VENDOR.to_string(),
            product: DEFAULT_PRODUCT.to_string(),
            version: DEFAULT_VERSION.to_string(),
            signature: DEFAULT_SIGNATURE.to_string(),
            name: DEFAULT_NAME.to_string(),
            severity: DEFAULT_SEVERITY.to_string(),
            fields: Vec::new(),
            reverse_mapping: false,
            delimiter: String::new(),
            raw_data_field: None,
            device: DeviceRole::default(),
            mode: CompatMode::default(),
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl CefCodecConfig {
    /// 코어 설정의 `[codec]` 섹션에서 코덱 설정을 만든다.
    ///
    /// 역할/모드 문자열이 알 수 없는 값이면 기본값으로 대체한다.
    /// (코어 설정의 `validate()`가 이미 값을 걸러낸 뒤라고 가정한다.)
    pub fn from_core(core: &CefBridgeConfig) -> Self {
        let codec = &core.codec;
        Self {
            vendor: codec.vendor.clone(),
            product: codec.product.clone(),
            version: codec.version.clone(),
            signature: codec.signature.clone(),
            name: codec.name.clone(),
            severity: codec.severity.clone(),
            fields: codec.fields.clone(),
            reverse_mapping: codec.reverse_mapping,
            delimiter: codec.delimiter.clone(),
            raw_data_field: if codec.raw_data_field.is_empty() {
                None
            } else {
                Some(codec.raw_data_field.clone())
            },
            device: DeviceRole::from_name(&codec.device),
            mode: CompatMode::from_name(&codec.mode),
            max_message_size: codec.max_message_size,
        }
    }

    /// 설정 값의 유효성을 검사한다.
    pub fn validate(&self) -> Result<(), CefCodecError> {
        if self.max_message_size == 0 {
            return Err(CefCodecError::Config {
                field: "max_message_size".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        for (name, template) in [
            ("vendor", &self.vendor),
            ("product", &self.product),
            ("version", &self.version),
            ("signature", &self.signature),
            ("name", &self.name),
            ("severity", &self.severity),
        ] {
            Template::parse(template).map_err(|e| CefCodecError::Config {
                field: name.to_string(),
                reason: e.to_string(),
            })?;
        }

        for field in &self.fields {
            FieldPath::parse(field).map_err(|e| CefCodecError::Config {
                field: format!("fields: '{field}'"),
                reason: e.to_string(),
            })?;
        }

        if let Some(raw_field) = &self.raw_data_field {
            FieldPath::parse(raw_field).map_err(|e| CefCodecError::Config {
                field: "raw_data_field".to_string(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }
}

/// [`CefCodecConfig`] 빌더. `build()`에서 검증까지 수행한다.
#[derive(Debug, Default)]
pub struct CefCodecConfigBuilder {
    config: CefCodecConfig,
}

impl CefCodecConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.config.vendor = vendor.into();
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.config.product = product.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.config.signature = signature.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn severity(mut self, severity: impl Into<String>) -> Self {
        self.config.severity = severity.into();
        self
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.config.fields.push(field.into());
        self
    }

    pub fn fields(mut self, fields: Vec<String>) -> Self {
        self.config.fields = fields;
        self
    }

    pub fn reverse_mapping(mut self, reverse: bool) -> Self {
        self.config.reverse_mapping = reverse;
        self
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.config.delimiter = delimiter.into();
        self
    }

    pub fn raw_data_field(mut self, field: impl Into<String>) -> Self {
        self.config.raw_data_field = Some(field.into());
        self
    }

    pub fn device(mut self, device: DeviceRole) -> Self {
        self.config.device = device;
        self
    }

    pub fn mode(mut self, mode: CompatMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn max_message_size(mut self, size: usize) -> Self {
        self.config.max_message_size = size;
        self
    }

    pub fn build(self) -> Result<CefCodecConfig, CefCodecError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
