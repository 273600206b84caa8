//! 에러 타입 — 도메인별 에러 정의

/// Cefbridge 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum CefBridgeError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 코덱 처리 에러
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 코덱 처리 에러
///
/// 코덱 구현 크레이트는 자체 에러 타입을 정의하고
/// 이 타입으로 변환하여 전파합니다.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// 디코딩 실패
    #[error("decode failed: {0}")]
    DecodeFailed(String),

    /// 인코딩 실패
    #[error("encode failed: {0}")]
    EncodeFailed(String),

    /// 코덱 초기화 실패
    #[error("codec init failed: {0}")]
    InitFailed(String),
}
