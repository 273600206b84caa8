#![doc = include_str!("../README.md")]

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod escape;
pub mod extension;
pub mod header;
pub mod interpolate;
pub mod mapping;
pub mod severity;
pub mod timestamp;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::CefCodecError;

// 설정
pub use config::{CefCodecConfig, CefCodecConfigBuilder, CompatMode, DeviceRole};

// 디코더 / 인코더
pub use decoder::{CefDecoder, PARSE_FAILURE_TAG};
pub use encoder::CefEncoder;

// 필드 매핑
pub use mapping::{MappingEntry, MappingTable};
