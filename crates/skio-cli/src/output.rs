//! Output formatting for course rendering.
//!
//! This module provides formatters for rendering course summaries
//! in the supported output formats (report text, per-leg text, JSON).

use std::io::{self, Write};

use clap::ValueEnum;
use skio_lib::{CourseRenderMode, CourseSummary};

/// Output formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Total distance and the visited junctions.
    #[default]
    Text,
    /// One line per leg between consecutive waypoints.
    Legs,
    /// Pretty-printed JSON summary.
    Json,
}

/// Render a course summary in the requested format to stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render(summary: &CourseSummary, format: OutputFormat) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => write_text(&mut stdout, summary, CourseRenderMode::PlainText),
        OutputFormat::Legs => write_text(&mut stdout, summary, CourseRenderMode::Legs),
        OutputFormat::Json => write_json(&mut stdout, summary),
    }
}

fn write_text<W: Write>(
    out: &mut W,
    summary: &CourseSummary,
    mode: CourseRenderMode,
) -> io::Result<()> {
    out.write_all(summary.render(mode).as_bytes())
}

fn write_json<W: Write>(out: &mut W, summary: &CourseSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary).map_err(io::Error::other)?;
    out.write_all(b"\n")
}
