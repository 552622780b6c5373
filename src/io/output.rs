use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::AnalysisResult;

/// Write the analysis record as pretty-printed JSON (2-space indent,
/// non-ASCII preserved). The artifact is write-once per run; a later
/// run with the same path overwrites it.
pub fn write_result_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, result).context("Failed to write analysis JSON")?;
    Ok(())
}

/// Human-readable rendering of an analysis record: the operator
/// dashboard's content as plain text.
pub struct HumanReport<'a> {
    result: &'a AnalysisResult,
}

impl<'a> HumanReport<'a> {
    pub fn new(result: &'a AnalysisResult) -> Self {
        Self { result }
    }

    pub fn format(&self) -> String {
        let r = self.result;
        let mut output = String::new();

        output.push_str(&format!("Call analysis: {}\n", r.file));
        output.push_str(&format!("Language: {}\n", r.language));
        output.push_str(&format!(
            "Resolved: {}\n\n",
            if r.resolved { "yes" } else { "no" }
        ));

        output.push_str("Transcript\n----------\n");
        for segment in &r.segments {
            output.push_str(&format!(
                "[{}-{}] {}\n",
                format_timestamp(segment.start),
                format_timestamp(segment.end),
                segment.text
            ));
        }
        output.push('\n');

        output.push_str("Speakers\n--------\n");
        for record in &r.per_speaker {
            output.push_str(&format!("{} ({})\n", record.speaker, record.role));
            if record.text_found {
                for line in wrap_text(&record.fused_text, 80).lines() {
                    output.push_str(&format!("  {line}\n"));
                }
            } else {
                output.push_str("  (no text found)\n");
            }
            output.push_str(&format!(
                "  sentiment: {} (polarity {:.2})\n",
                record.sentiment.sentiment, record.sentiment.polarity
            ));
            for intent in &record.intents {
                output.push_str(&format!("  intent: {intent}\n"));
            }
            output.push('\n');
        }

        output.push_str("Summary\n-------\n");
        if r.summary.is_empty() {
            output.push_str("(no summary)\n");
        } else {
            output.push_str(&wrap_text(&r.summary, 80));
            output.push('\n');
        }
        output.push('\n');

        output.push_str("Pipeline\n--------\n");
        for state in r.pipeline_status.steps() {
            output.push_str(&format!("{}: {}\n", state.step, state.status));
        }

        output
    }

    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Format seconds as MM:SS.mmm
fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let minutes = total_ms / 60_000;
    let secs = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{:02}:{:02}.{:03}", minutes, secs, millis)
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        if line_len + word.len() + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word.len();
    }

    result
}
