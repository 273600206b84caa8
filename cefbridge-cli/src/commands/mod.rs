//! Command handlers -- one module per subcommand

use std::path::Path;

use tracing::debug;

use cefbridge_codec::CefCodecConfig;
use cefbridge_core::config::CefBridgeConfig;

use crate::error::CliError;

pub mod config;
pub mod decode;
pub mod encode;
pub mod fields;

/// Load the codec configuration for data-path commands.
///
/// Missing files fall back to built-in defaults so `decode`/`encode`/`fields`
/// work without a `cefbridge.toml`. A file that exists but fails to parse or
/// validate is still an error.
pub(crate) async fn load_codec_config(config_path: &Path) -> Result<CefCodecConfig, CliError> {
    if !config_path.exists() {
        debug!(path = %config_path.display(), "config file not found, using defaults");
        return Ok(CefCodecConfig::default());
    }
    let core = CefBridgeConfig::load(config_path).await?;
    Ok(CefCodecConfig::from_core(&core))
}

/// Read the whole input: a file when given, stdin otherwise.
pub(crate) async fn read_input(input: Option<&Path>) -> Result<String, CliError> {
    match input {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Describe the input source for reports and logs.
pub(crate) fn source_label(input: Option<&Path>) -> String {
    match input {
        Some(path) => path.display().to_string(),
        None => "<stdin>".to_owned(),
    }
}
