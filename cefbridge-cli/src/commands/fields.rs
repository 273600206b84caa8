//! `cefbridge fields` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use cefbridge_codec::mapping::{MappingEntry, MappingTable};

use crate::cli::FieldsArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `fields` command.
///
/// Builds the mapping table the current configuration would use and lists
/// its dictionary entries, optionally filtered by a substring.
pub async fn execute(
    args: FieldsArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = super::load_codec_config(config_path).await?;
    let table = MappingTable::new(config.mode, config.device, config.reverse_mapping)?;

    let mut entries = table.entries();
    if let Some(filter) = &args.filter {
        let needle = filter.to_lowercase();
        entries.retain(|entry| {
            entry.long.to_lowercase().contains(&needle)
                || entry.key.to_lowercase().contains(&needle)
                || entry.target.to_lowercase().contains(&needle)
        });
    }

    let report = FieldsReport {
        mode: table.mode().name().to_owned(),
        device: table.device().prefix().to_owned(),
        reverse_mapping: table.reverse_mapping(),
        shown: entries.len(),
        filter: args.filter,
        entries,
    };

    writer.render(&report)?;

    Ok(())
}

/// Field mapping dictionary report.
#[derive(Serialize)]
pub struct FieldsReport {
    /// Compatibility mode in effect (ecs, legacy)
    pub mode: String,
    /// Device placeholder resolution (observer, host)
    pub device: String,
    /// Whether encoding prefers short keys
    pub reverse_mapping: bool,
    /// Number of entries listed
    pub shown: usize,
    /// Substring filter that was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Dictionary entries in table order
    pub entries: Vec<MappingEntry>,
}

impl Render for FieldsReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Field mappings (mode: {}, device: {}, reverse: {})",
            self.mode.bold(),
            self.device,
            self.reverse_mapping
        )?;
        if let Some(filter) = &self.filter {
            writeln!(w, "Filter: {}", filter)?;
        }
        writeln!(w)?;

        writeln!(w, "{:<38} {:<26} Target", "Full name", "Key")?;
        writeln!(w, "{}", "-".repeat(90))?;
        for entry in &self.entries {
            writeln!(w, "{:<38} {:<26} {}", entry.long, entry.key, entry.target)?;
        }

        writeln!(w)?;
        writeln!(w, "{} entries", self.shown)?;

        Ok(())
    }
}
