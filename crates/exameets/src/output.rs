//! Record rendering for the CLI output formats.
//!
//! Everything the portal serves is an opaque [`Record`], so the table,
//! detail, and plain views are built around it directly; the structured
//! formats serialize whatever they are given, schema and all.

use std::io::{self, IsTerminal, Write};

use exameets_core::Record;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Record views ─────────────────────────────────────────────────────

/// One listing row: the columns every section shares.
#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Posted")]
    posted: String,
}

impl From<&Record> for RecordRow {
    fn from(r: &Record) -> Self {
        Self {
            id: r.id.clone(),
            title: r.display_title().to_owned(),
            posted: r
                .created_at()
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Render a listing of records in the chosen format.
///
/// `table` gets the shared id/title/posted columns; `plain` emits one
/// id per line for scripting; the structured formats serialize the
/// records untouched.
pub fn render_records(format: &OutputFormat, records: &[Record]) -> String {
    match format {
        OutputFormat::Table => Table::new(records.iter().map(RecordRow::from))
            .with(Style::rounded())
            .to_string(),
        OutputFormat::Json => render_json(records, false),
        OutputFormat::JsonCompact => render_json(records, true),
        OutputFormat::Yaml => render_yaml(records),
        OutputFormat::Plain => records
            .iter()
            .map(|r| r.id.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Render a single record in the chosen format.
pub fn render_record(format: &OutputFormat, record: &Record) -> String {
    match format {
        OutputFormat::Table => record_detail(record),
        OutputFormat::Json => render_json(record, false),
        OutputFormat::JsonCompact => render_json(record, true),
        OutputFormat::Yaml => render_yaml(record),
        OutputFormat::Plain => record.id.clone(),
    }
}

/// Field-per-line detail view: title headline, id, then every stored
/// field. Array fields (skills, subjects, ...) are joined back into the
/// comma-separated form the portal's forms use.
fn record_detail(record: &Record) -> String {
    let mut lines = Vec::with_capacity(record.fields.len() + 2);
    lines.push(record.display_title().to_owned());
    lines.push(format!("id: {}", record.id));
    for (key, value) in &record.fields {
        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_owned))
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        };
        lines.push(format!("{key}: {rendered}"));
    }
    lines.join("\n")
}

// ── Structured formats ───────────────────────────────────────────────

/// Serialize arbitrary data for the structured formats. Returns `None`
/// for `table` and `plain`, whose rendering is caller-specific.
pub fn render_structured<T: serde::Serialize>(format: &OutputFormat, data: &T) -> Option<String> {
    match format {
        OutputFormat::Json => Some(render_json(data, false)),
        OutputFormat::JsonCompact => Some(render_json(data, true)),
        OutputFormat::Yaml => Some(render_yaml(data)),
        OutputFormat::Table | OutputFormat::Plain => None,
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.unwrap_or_else(|e| format!("<serialization failed: {e}>"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("<serialization failed: {e}>"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Record {
        serde_json::from_value(json!({
            "_id": "j1",
            "title": "Backend Engineer",
            "skills": ["rust", "tokio"],
            "createdAt": "2026-08-01T08:00:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn detail_view_joins_array_fields() {
        let out = record_detail(&record());
        assert!(out.starts_with("Backend Engineer\nid: j1"));
        assert!(out.contains("skills: rust, tokio"));
    }

    #[test]
    fn plain_listing_is_one_id_per_line() {
        let records = vec![record(), record()];
        let out = render_records(&OutputFormat::Plain, &records);
        assert_eq!(out, "j1\nj1");
    }

    #[test]
    fn structured_rendering_skips_human_formats() {
        let records = vec![record()];
        assert!(render_structured(&OutputFormat::Table, &records).is_none());
        let json = render_structured(&OutputFormat::JsonCompact, &records).unwrap();
        assert!(json.contains("\"_id\":\"j1\""));
    }
}
