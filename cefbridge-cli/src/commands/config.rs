//! `cefbridge config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use cefbridge_codec::CefCodecConfig;
use cefbridge_core::config::CefBridgeConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Execute the config validate subcommand.
///
/// Loads the file, then runs the codec-level validation on top (header
/// templates, field paths). All errors are reported together.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails.
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let mut errors = Vec::new();
    match CefBridgeConfig::load(config_path).await {
        Ok(config) => {
            let codec = CefCodecConfig::from_core(&config);
            if let Err(e) = codec.validate() {
                errors.push(e.to_string());
            }
        }
        Err(e) => errors.push(e.to_string()),
    }

    let report = ConfigValidationReport {
        source: config_path.display().to_string(),
        valid: errors.is_empty(),
        errors,
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Execute the config show subcommand.
///
/// Loads and displays the effective configuration (file + env overrides +
/// defaults), optionally filtered to one section.
///
/// # Errors
///
/// Returns `CliError::Config` if loading fails or `CliError::Command` if
/// the section name is invalid.
async fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = CefBridgeConfig::load(config_path).await?;

    let report = if let Some(section_name) = section {
        match section_name.as_str() {
            "general" => ConfigReport {
                source: config_path.display().to_string(),
                section: Some("general".to_owned()),
                config_toml: toml::to_string_pretty(&config.general)
                    .unwrap_or_else(|e| format!("(serialization error: {})", e)),
            },
            "codec" => ConfigReport {
                source: config_path.display().to_string(),
                section: Some("codec".to_owned()),
                config_toml: toml::to_string_pretty(&config.codec)
                    .unwrap_or_else(|e| format!("(serialization error: {})", e)),
            },
            _ => {
                return Err(CliError::Command(format!(
                    "unknown section: {} (expected: general, codec)",
                    section_name
                )));
            }
        }
    } else {
        ConfigReport {
            source: config_path.display().to_string(),
            section: None,
            config_toml: toml::to_string_pretty(&config)
                .unwrap_or_else(|e| format!("(serialization error: {})", e)),
        }
    };

    writer.render(&report)?;

    Ok(())
}

/// Configuration display report.
///
/// The `config_toml` field is skipped during JSON serialization (only used
/// for text rendering).
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Serialized TOML configuration
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}
