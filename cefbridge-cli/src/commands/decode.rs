//! `cefbridge decode` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use cefbridge_codec::decoder::{CefDecoder, PARSE_FAILURE_TAG};
use cefbridge_core::event::{Event, FieldValue, TAGS_FIELD};

use crate::cli::DecodeArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `decode` command.
///
/// Reads one CEF message per line, decodes each into a structured event
/// and prints the events as JSON lines. Lines that cannot be decoded
/// become fallback events and are counted as failures.
///
/// # Errors
///
/// Returns `CliError::Decode` (exit code 4) when any line produced a
/// fallback event, so pipelines can detect partially bad input.
pub async fn execute(
    args: DecodeArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = super::load_codec_config(config_path).await?;
    let decoder = CefDecoder::new(config)?;

    let source = super::source_label(args.input.as_deref());
    info!(source = %source, "decoding CEF input");

    let text = super::read_input(args.input.as_deref()).await?;

    let mut report = DecodeReport {
        source,
        lines: 0,
        decoded: 0,
        failed: 0,
        summary_only: args.summary_only,
        events: Vec::new(),
    };

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        report.lines += 1;

        let event = decoder.decode(line.as_bytes());
        if is_fallback(&event) {
            report.failed += 1;
        } else {
            report.decoded += 1;
        }
        if !args.summary_only {
            report.events.push(serde_json::to_value(&event)?);
        }
    }

    writer.render(&report)?;

    if report.failed > 0 {
        return Err(CliError::Decode(format!(
            "{} of {} lines produced fallback events",
            report.failed, report.lines
        )));
    }

    Ok(())
}

/// A decoded event is a fallback when it carries the parse failure tag.
fn is_fallback(event: &Event) -> bool {
    match event.fields().get(TAGS_FIELD) {
        Some(FieldValue::Array(items)) => items
            .iter()
            .any(|item| item.as_text() == Some(PARSE_FAILURE_TAG)),
        _ => false,
    }
}

/// Decode run report.
///
/// In text mode the decoded events print one JSON object per line, so the
/// output can be piped straight into `jq` or a log shipper. The summary
/// block only appears for `--summary-only` or when failures occurred.
#[derive(Serialize)]
pub struct DecodeReport {
    /// Input source (file path or `<stdin>`)
    pub source: String,
    /// Non-empty input lines
    pub lines: usize,
    /// Successfully decoded lines
    pub decoded: usize,
    /// Lines that produced fallback events
    pub failed: usize,
    /// Whether event bodies were suppressed
    #[serde(skip)]
    pub summary_only: bool,
    /// Decoded events (empty with `--summary-only`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<serde_json::Value>,
}

impl Render for DecodeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for event in &self.events {
            let line = serde_json::to_string(event).map_err(std::io::Error::other)?;
            writeln!(w, "{}", line)?;
        }

        if self.summary_only || self.failed > 0 {
            writeln!(w, "Decode: {}", self.source.bold())?;
            writeln!(w, "  Lines: {}", self.lines)?;
            writeln!(w, "  Decoded: {}", self.decoded.to_string().green())?;
            if self.failed > 0 {
                writeln!(w, "  Failed: {}", self.failed.to_string().red().bold())?;
            } else {
                writeln!(w, "  Failed: {}", self.failed)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cefbridge_codec::CefCodecConfig;

    fn decode_value(raw: &str) -> (Event, bool) {
        let decoder = CefDecoder::new(CefCodecConfig::default()).expect("decoder must build");
        let event = decoder.decode(raw.as_bytes());
        let fallback = is_fallback(&event);
        (event, fallback)
    }

    #[test]
    fn test_is_fallback_detects_tagged_event() {
        let (_, fallback) = decode_value("CEF:0|V|P|1|100|N|5|rt=bogus");
        assert!(fallback, "invalid receipt time should produce fallback");
    }

    #[test]
    fn test_is_fallback_ignores_clean_event() {
        let (_, fallback) = decode_value("CEF:0|V|P|1|100|N|5|src=1.2.3.4");
        assert!(!fallback, "valid message should not be a fallback");
    }

    #[test]
    fn test_report_render_text_events_are_json_lines() {
        let report = DecodeReport {
            source: "input.cef".to_owned(),
            lines: 2,
            decoded: 2,
            failed: 0,
            summary_only: false,
            events: vec![
                serde_json::json!({"source": {"ip": "1.2.3.4"}}),
                serde_json::json!({"message": "hello"}),
            ],
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2, "clean run should print only event lines");
        for line in lines {
            serde_json::from_str::<serde_json::Value>(line)
                .expect("each output line should be valid JSON");
        }
    }

    #[test]
    fn test_report_render_text_summary_on_failures() {
        let report = DecodeReport {
            source: "input.cef".to_owned(),
            lines: 3,
            decoded: 2,
            failed: 1,
            summary_only: false,
            events: Vec::new(),
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Decode: input.cef"), "should show source");
        assert!(output.contains("Failed:"), "should show failure counter");
    }

    #[test]
    fn test_report_json_skips_empty_events() {
        let report = DecodeReport {
            source: "<stdin>".to_owned(),
            lines: 1,
            decoded: 1,
            failed: 0,
            summary_only: true,
            events: Vec::new(),
        };

        let json = serde_json::to_string(&report).expect("JSON serialization should succeed");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("should parse JSON");
        assert!(
            parsed.get("events").is_none(),
            "empty events should be skipped"
        );
        assert_eq!(parsed["decoded"].as_u64(), Some(1));
    }
}
