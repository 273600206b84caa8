//! CLI-specific error types and exit code mapping

use cefbridge_codec::CefCodecError;
use cefbridge_core::error::CefBridgeError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// One or more input lines could not be decoded (non-zero exit for pipelines).
    #[error("decode error: {0}")]
    Decode(String),

    /// One or more events could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from cefbridge-core.
    #[error("{0}")]
    Core(#[from] CefBridgeError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                |
    /// |------|----------------------------------------|
    /// | 0    | Success                                |
    /// | 1    | General / command / encode error       |
    /// | 2    | Configuration error                    |
    /// | 4    | Decode produced failure events         |
    /// | 10   | IO error                               |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(CefBridgeError::Config(_)) => 2,
            Self::Decode(_) => 4,
            Self::Io(_) | Self::Core(CefBridgeError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Encode(_) | Self::Core(_) => 1,
        }
    }
}

impl From<CefCodecError> for CliError {
    fn from(e: CefCodecError) -> Self {
        match &e {
            CefCodecError::Config { .. } | CefCodecError::Template { .. } => {
                Self::Config(e.to_string())
            }
            _ => Self::Command(e.to_string()),
        }
    }
}
