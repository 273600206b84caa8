//! 설정 관리 — cefbridge.toml 파싱 및 런타임 설정
//!
//! [`CefBridgeConfig`]는 전체 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`CEFBRIDGE_CODEC_DEVICE=host` 형식)
//! 3. 설정 파일 (`cefbridge.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), cefbridge_core::error::CefBridgeError> {
//! use cefbridge_core::config::CefBridgeConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = CefBridgeConfig::load("cefbridge.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = CefBridgeConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CefBridgeError, ConfigError};
use crate::event::FieldPath;

/// Cefbridge 통합 설정
///
/// `cefbridge.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CefBridgeConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 코덱 설정
    #[serde(default)]
    pub codec: CodecConfig,
}

impl CefBridgeConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CefBridgeError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, CefBridgeError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CefBridgeError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                CefBridgeError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, CefBridgeError> {
        toml::from_str(toml_str).map_err(|e| {
            CefBridgeError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `CEFBRIDGE_{SECTION}_{FIELD}`
    /// 예: `CEFBRIDGE_CODEC_DEVICE=host`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "CEFBRIDGE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "CEFBRIDGE_GENERAL_LOG_FORMAT");

        // Codec
        override_string(&mut self.codec.vendor, "CEFBRIDGE_CODEC_VENDOR");
        override_string(&mut self.codec.product, "CEFBRIDGE_CODEC_PRODUCT");
        override_string(&mut self.codec.version, "CEFBRIDGE_CODEC_VERSION");
        override_string(&mut self.codec.signature, "CEFBRIDGE_CODEC_SIGNATURE");
        override_string(&mut self.codec.name, "CEFBRIDGE_CODEC_NAME");
        override_string(&mut self.codec.severity, "CEFBRIDGE_CODEC_SEVERITY");
        override_csv(&mut self.codec.fields, "CEFBRIDGE_CODEC_FIELDS");
        override_bool(
            &mut self.codec.reverse_mapping,
            "CEFBRIDGE_CODEC_REVERSE_MAPPING",
        );
        override_string(&mut self.codec.delimiter, "CEFBRIDGE_CODEC_DELIMITER");
        override_string(
            &mut self.codec.raw_data_field,
            "CEFBRIDGE_CODEC_RAW_DATA_FIELD",
        );
        override_string(&mut self.codec.device, "CEFBRIDGE_CODEC_DEVICE");
        override_string(&mut self.codec.mode, "CEFBRIDGE_CODEC_MODE");
        override_usize(
            &mut self.codec.max_message_size,
            "CEFBRIDGE_CODEC_MAX_MESSAGE_SIZE",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), CefBridgeError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // device 역할 검증
        let valid_devices = ["observer", "host"];
        if !valid_devices.contains(&self.codec.device.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "codec.device".to_owned(),
                reason: format!("must be one of: {}", valid_devices.join(", ")),
            }
            .into());
        }

        // 호환 모드 검증
        let valid_modes = ["ecs", "legacy"];
        if !valid_modes.contains(&self.codec.mode.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "codec.mode".to_owned(),
                reason: format!("must be one of: {}", valid_modes.join(", ")),
            }
            .into());
        }

        if self.codec.max_message_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "codec.max_message_size".to_owned(),
                reason: "must be greater than zero".to_owned(),
            }
            .into());
        }

        // 인코딩 대상 필드 경로 검증
        for field in &self.codec.fields {
            FieldPath::parse(field).map_err(|e| {
                ConfigError::InvalidValue {
                    field: "codec.fields".to_owned(),
                    reason: e.to_string(),
                }
            })?;
        }

        // 원문 보존 필드 경로 검증 (빈 문자열이면 비활성)
        if !self.codec.raw_data_field.is_empty() {
            FieldPath::parse(&self.codec.raw_data_field).map_err(|e| {
                ConfigError::InvalidValue {
                    field: "codec.raw_data_field".to_owned(),
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(())
    }
}

// Default는 derive 매크로로 자동 생성 (각 필드가 Default를 구현하므로)

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 코덱 설정
///
/// 인코딩 헤더 템플릿(`%{field.path}` 보간)과 매핑 동작을 제어합니다.
/// 타입이 파싱된 형태는 코덱 크레이트의 설정 타입이 담당합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// 헤더 벤더 템플릿
    pub vendor: String,
    /// 헤더 제품명 템플릿
    pub product: String,
    /// 헤더 제품 버전 템플릿
    pub version: String,
    /// 헤더 시그니처 ID 템플릿
    pub signature: String,
    /// 헤더 이벤트명 템플릿
    pub name: String,
    /// 헤더 심각도 템플릿 (0-10 정수로 정규화)
    pub severity: String,
    /// 확장부에 인코딩할 필드 경로 목록
    pub fields: Vec<String>,
    /// 인코딩 시 축약 키 사용 여부 (`src` vs `sourceAddress`)
    pub reverse_mapping: bool,
    /// 인코딩된 메시지 끝에 붙일 구분자
    pub delimiter: String,
    /// 디코딩 성공 시 원문을 보존할 필드 경로 (빈 문자열이면 비활성)
    pub raw_data_field: String,
    /// 장치 필드 해석 역할 (observer, host)
    pub device: String,
    /// 필드 매핑 호환 모드 (ecs, legacy)
    pub mode: String,
    /// 디코딩 최대 메시지 크기 (바이트)
    pub max_message_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            vendor: "CefBridge".to_owned(),
            product: "Codec".to_owned(),
            version: "1.0".to_owned(),
            signature: "CefBridge".to_owned(),
            name: "CefBridge".to_owned(),
            severity: "6".to_owned(),
            fields: Vec::new(),
            reverse_mapping: false,
            delimiter: String::new(),
            raw_data_field: String::new(),
            device: "observer".to_owned(),
            mode: "ecs".to_owned(),
            max_message_size: 256 * 1024, // 256KB
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val.split(',').map(|s| s.trim().to_owned()).collect();
    }
}
