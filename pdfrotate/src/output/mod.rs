//! Output formatting and display for pdfrotate.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Session and export summaries
//! - JSON reports
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use pdfrotate::output::OutputFormatter;
//! use pdfrotate::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Loading scan.pdf");
//! formatter.success("Rotated PDF saved");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use serde::Serialize;

use crate::error::{PdfRotateError, Result};
use crate::export::ExportOutcome;
use crate::io::LoadedPdf;
use crate::preview::ThumbnailSheet;
use crate::session::Session;
use crate::state::RotationState;
use crate::utils::format_file_size;

/// Machine-readable view of a session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport<'a> {
    /// Loaded file name, if any.
    pub document: Option<&'a str>,

    /// Pages in the loaded file.
    pub page_count: usize,

    /// Rotation store contents.
    pub state: &'a RotationState,

    /// Preview layout for the loaded file.
    pub preview: Option<ThumbnailSheet>,
}

impl<'a> SessionReport<'a> {
    /// Capture the current state of `session`.
    pub fn new(session: &'a Session) -> Self {
        Self {
            document: session.document().map(|doc| doc.name.as_str()),
            page_count: session.document().map_or(0, |doc| doc.page_count),
            state: session.state(),
            preview: session.thumbnails(),
        }
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        to_json(self)
    }
}

/// Machine-readable result of a one-shot run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport<'a> {
    /// Session state after the requested actions.
    pub session: SessionReport<'a>,

    /// What the export produced.
    pub outcome: &'a ExportOutcome,

    /// Whether the file was only built in memory.
    pub dry_run: bool,
}

/// Serialize any report as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PdfRotateError::other(format!("Failed to serialize report: {e}")))
}

/// One-line description of a loaded document.
pub fn document_summary(document: &LoadedPdf) -> String {
    format!(
        "{}: {} page(s), {}, PDF {}",
        document.name,
        document.page_count,
        document.format_file_size(),
        document.version
    )
}

/// Human-readable lines describing the session state.
///
/// Only rotated pages are listed.
pub fn session_lines(session: &Session) -> Vec<String> {
    let Some(document) = session.document() else {
        return vec!["No document loaded".to_string()];
    };

    let state = session.state();
    let mut lines = vec![
        document_summary(document),
        format!("Thumbnail size: {}px", state.thumbnail_size),
    ];

    let rotated: Vec<String> = state
        .pages
        .values()
        .filter(|entry| entry.rotation().as_degrees() != 0)
        .map(|entry| format!("Page {}: {}", entry.page_index + 1, entry.rotation()))
        .collect();

    if rotated.is_empty() {
        lines.push("No pages rotated".to_string());
    } else {
        lines.push(format!("{} page(s) rotated", rotated.len()));
        lines.extend(rotated.into_iter().map(|line| format!("  {line}")));
    }

    lines
}

/// One-line description of a finished export.
pub fn outcome_summary(outcome: &ExportOutcome) -> String {
    format!(
        "Saved {} ({} page(s), {} rotated, {}) in {:.2}s",
        outcome.saved_to.display(),
        outcome.page_count,
        outcome.rotated_pages,
        format_file_size(outcome.output_size),
        outcome.elapsed.as_secs_f64()
    )
}

/// Display the session state to the user.
pub fn display_session(formatter: &OutputFormatter, session: &Session) {
    for line in session_lines(session) {
        formatter.info(&line);
    }
}

/// Display an export outcome to the user.
pub fn display_outcome(formatter: &OutputFormatter, outcome: &ExportOutcome) {
    formatter.success(&outcome_summary(outcome));
    formatter.detail("File name", &outcome.file_name);
    formatter.detail("Output size", &format_file_size(outcome.output_size));
}
