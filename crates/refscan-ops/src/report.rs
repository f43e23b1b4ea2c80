//! Display collaborator: turns scan responses into reports.

use std::io::Write;

use askama::Template;
use refscan_core::FindingReason;
use serde::{Deserialize, Serialize};

use crate::error::OpsResult;
use crate::responses::ScanResponse;

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Markdown table.
    #[default]
    Markdown,
    /// Pretty-printed JSON of the full response.
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use 'md' or 'json'", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Markdown => write!(f, "md"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Consumes scan responses for presentation.
pub trait ResultDisplay {
    /// Present one scan response.
    fn display(&mut self, response: &ScanResponse) -> OpsResult<()>;
}

/// Renders responses as text in a given format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer {
    format: ReportFormat,
}

impl ReportRenderer {
    /// Create a renderer for `format`.
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Render a response.
    pub fn render(&self, response: &ScanResponse) -> OpsResult<String> {
        match self.format {
            ReportFormat::Markdown => render_markdown(response),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        }
    }
}

fn render_markdown(response: &ScanResponse) -> OpsResult<String> {
    let rows = response
        .results
        .iter()
        .map(|result| ReportRow {
            context: escape_cell(&result.context),
            object: escape_cell(&result.full_path),
            reason: result.reason,
            field: if result.field_name.is_empty() {
                "-".to_string()
            } else {
                escape_cell(&result.field_name)
            },
        })
        .collect();

    Ok(MarkdownReport { response, rows }.render()?)
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// Askama template for the markdown report.
#[derive(Template)]
#[template(path = "report.md", escape = "none")]
struct MarkdownReport<'a> {
    response: &'a ScanResponse,
    rows: Vec<ReportRow>,
}

/// One table row, with cells already escaped.
struct ReportRow {
    context: String,
    object: String,
    reason: FindingReason,
    field: String,
}

/// Display collaborator writing rendered reports to any writer.
pub struct WriterDisplay<W: Write> {
    writer: W,
    renderer: ReportRenderer,
}

impl<W: Write> WriterDisplay<W> {
    /// Create a display writing `format` reports to `writer`.
    pub fn new(writer: W, format: ReportFormat) -> Self {
        Self {
            writer,
            renderer: ReportRenderer::new(format),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultDisplay for WriterDisplay<W> {
    fn display(&mut self, response: &ScanResponse) -> OpsResult<()> {
        let rendered = self.renderer.render(response)?;
        self.writer.write_all(rendered.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}
