//! `cefbridge encode` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use cefbridge_codec::encoder::CefEncoder;
use cefbridge_core::event::Event;

use crate::cli::EncodeArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `encode` command.
///
/// Reads one JSON event per line and prints one CEF message per event.
/// Lines that are not valid JSON objects, and events the encoder rejects,
/// are collected as errors.
///
/// # Errors
///
/// Returns `CliError::Encode` when any input line failed to encode.
pub async fn execute(
    args: EncodeArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = super::load_codec_config(config_path).await?;
    let encoder = CefEncoder::new(config)?;

    let source = super::source_label(args.input.as_deref());
    info!(source = %source, "encoding events to CEF");

    let text = super::read_input(args.input.as_deref()).await?;

    let mut report = EncodeReport {
        source,
        events: 0,
        encoded: 0,
        failed: 0,
        messages: Vec::new(),
        errors: Vec::new(),
    };

    for (number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        report.events += 1;

        let event = match serde_json::from_str::<Event>(line) {
            Ok(event) => event,
            Err(e) => {
                report.failed += 1;
                report.errors.push(format!("line {}: {}", number + 1, e));
                continue;
            }
        };

        match encoder.encode(&event) {
            Ok(message) => {
                report.encoded += 1;
                report.messages.push(message);
            }
            Err(e) => {
                report.failed += 1;
                report.errors.push(format!("line {}: {}", number + 1, e));
            }
        }
    }

    writer.render(&report)?;

    if report.failed > 0 {
        return Err(CliError::Encode(format!(
            "{} of {} events failed to encode",
            report.failed, report.events
        )));
    }

    Ok(())
}

/// Encode run report.
///
/// In text mode the CEF messages print one per line; error details only
/// appear when something failed, keeping successful output pipeable.
#[derive(Serialize)]
pub struct EncodeReport {
    /// Input source (file path or `<stdin>`)
    pub source: String,
    /// Non-empty input lines
    pub events: usize,
    /// Successfully encoded events
    pub encoded: usize,
    /// Events that failed to parse or encode
    pub failed: usize,
    /// Encoded CEF messages
    pub messages: Vec<String>,
    /// Per-line error details (empty on success)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Render for EncodeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for message in &self.messages {
            writeln!(w, "{}", message)?;
        }

        if self.failed > 0 {
            writeln!(w, "Encode: {}", self.source.bold())?;
            writeln!(w, "  Events: {}", self.events)?;
            writeln!(w, "  Encoded: {}", self.encoded.to_string().green())?;
            writeln!(w, "  Failed: {}", self.failed.to_string().red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_line_parses() {
        let line = r#"{"source":{"ip":"1.2.3.4"},"message":"hello","count":3}"#;
        let event: Event = serde_json::from_str(line).expect("event line should parse");
        assert_eq!(event.len(), 3, "top-level fields should be preserved");
    }

    #[test]
    fn test_event_json_rejects_non_object() {
        let result = serde_json::from_str::<Event>("[1, 2, 3]");
        assert!(result.is_err(), "arrays are not events");
    }

    #[test]
    fn test_report_render_text_messages_only_on_success() {
        let report = EncodeReport {
            source: "events.jsonl".to_owned(),
            events: 2,
            encoded: 2,
            failed: 0,
            messages: vec![
                "CEF:0|A|B|1|100|N|5|src=1.2.3.4".to_owned(),
                "CEF:0|A|B|1|100|N|5|src=5.6.7.8".to_owned(),
            ],
            errors: Vec::new(),
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2, "clean run should print only CEF lines");
        assert!(lines[0].starts_with("CEF:0|"), "lines should be CEF messages");
    }

    #[test]
    fn test_report_render_text_shows_errors() {
        let report = EncodeReport {
            source: "<stdin>".to_owned(),
            events: 2,
            encoded: 1,
            failed: 1,
            messages: vec!["CEF:0|A|B|1|100|N|5|".to_owned()],
            errors: vec!["line 2: expected value at line 1 column 1".to_owned()],
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Failed: 1"), "should show failure counter");
        assert!(output.contains("line 2:"), "should show per-line error");
    }

    #[test]
    fn test_report_json_skips_empty_errors() {
        let report = EncodeReport {
            source: "<stdin>".to_owned(),
            events: 1,
            encoded: 1,
            failed: 0,
            messages: vec!["CEF:0|A|B|1|100|N|5|".to_owned()],
            errors: Vec::new(),
        };

        let json = serde_json::to_string(&report).expect("JSON serialization should succeed");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("should parse JSON");
        assert!(
            parsed.get("errors").is_none(),
            "empty errors should be skipped"
        );
        assert_eq!(
            parsed["messages"]
                .as_array()
                .expect("messages is array")
                .len(),
            1
        );
    }
}
