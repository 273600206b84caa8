//! CEF 코덱 에러 타입
//!
//! 코덱 내부에서 발생하는 에러를 세분화해 정의하고,
//! 상위 레이어로 전파할 때 [`CefBridgeError`]로 변환합니다.

use cefbridge_core::error::{CefBridgeError, CodecError};

/// CEF 코덱 내부 에러
#[derive(Debug, thiserror::Error)]
pub enum CefCodecError {
    /// 입력이 유효한 UTF-8 텍스트가 아님
    #[error("invalid text encoding: {reason}")]
    Encoding {
        /// 실패 원인
        reason: String,
    },

    /// 입력 크기가 허용치를 초과함
    #[error("input too large: {size} bytes (max: {max})")]
    TooLarge {
        /// 입력 크기 (바이트)
        size: usize,
        /// 허용 최대 크기 (바이트)
        max: usize,
    },

    /// 타임스탬프 값을 해석할 수 없음
    #[error("invalid timestamp '{value}': {reason}")]
    Timestamp {
        /// 원본 값
        value: String,
        /// 실패 원인
        reason: String,
    },

    /// 헤더 템플릿 문법 오류
    #[error("invalid template '{template}': {reason}")]
    Template {
        /// 템플릿 문자열
        template: String,
        /// 실패 원인
        reason: String,
    },

    /// 코덱 설정 오류
    #[error("invalid codec config: {field}: {reason}")]
    Config {
        /// 문제가 된 설정 필드
        field: String,
        /// 실패 원인
        reason: String,
    },

    /// 복합 값 직렬화 실패
    #[error("value serialization failed: {reason}")]
    Serialize {
        /// 실패 원인
        reason: String,
    },
}

impl From<CefCodecError> for CefBridgeError {
    fn from(err: CefCodecError) -> Self {
        let mapped = match &err {
            CefCodecError::Config { .. } | CefCodecError::Template { .. } => {
                CodecError::InitFailed(err.to_string())
            }
            CefCodecError::Serialize { .. } => CodecError::EncodeFailed(err.to_string()),
            CefCodecError::Encoding { .. }
            | CefCodecError::TooLarge { .. }
            | CefCodecError::Timestamp { .. } => CodecError::DecodeFailed(err.to_string()),
        };
        CefBridgeError::Codec(mapped)
    }
}
