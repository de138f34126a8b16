//! Materializing the rotated document.
//!
//! The pipeline never edits anything in place. Every export decodes the
//! original bytes again, writes each page's `/Rotate` from the rotation
//! snapshot, and re-serializes the result. Content streams are left alone.

use lopdf::{Document, Object, ObjectId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;

use super::naming::{Clock, output_file_name};
use super::saver::FileSaver;
use crate::error::{PdfRotateError, Result};
use crate::io::LoadedPdf;
use crate::state::{Action, PageRotation, PageRotationEntry, RotationSnapshot, RotationStore};
use crate::utils::inherited_attribute;

/// How the tracked rotation combines with a page's existing `/Rotate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationMode {
    /// Write the tracked rotation as the page's absolute orientation.
    #[default]
    Replace,
    /// Add the tracked rotation on top of the page's existing orientation.
    Relative,
}

/// Options for one export.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// How to combine with existing page rotation.
    pub mode: RotationMode,

    /// Compress streams before writing. Off keeps content streams byte-identical.
    pub compress: bool,
}

/// What a finished export produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    /// Generated file name.
    pub file_name: String,

    /// Location reported by the saver.
    pub saved_to: PathBuf,

    /// Pages in the exported document.
    pub page_count: usize,

    /// Pages that ended up with a non-zero tracked rotation.
    pub rotated_pages: usize,

    /// Size of the exported document in bytes.
    pub output_size: u64,

    /// Wall time from start to saved file.
    pub elapsed: Duration,
}

/// Apply a rotation snapshot to a PDF buffer and return the new buffer.
///
/// Pages are matched by 0-based position in document order. Positions with no
/// snapshot entry are treated as unrotated. `input` is only read.
///
/// # Errors
///
/// Returns [`PdfRotateError::FailedToLoadPdf`] if the input cannot be
/// decoded, [`PdfRotateError::CorruptedPdf`] if a page is not a dictionary,
/// and [`PdfRotateError::FailedToEncode`] if serialization fails.
pub fn apply_rotations(
    input: &[u8],
    snapshot: &RotationSnapshot,
    options: &ExportOptions,
) -> Result<Vec<u8>> {
    let mut doc = Document::load_mem(input)
        .map_err(|e| PdfRotateError::failed_to_load_pdf("input document", e.to_string()))?;

    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

    for (index, page_id) in page_ids.into_iter().enumerate() {
        let requested = snapshot
            .get(&index)
            .map(PageRotationEntry::rotation)
            .unwrap_or_default();

        let target = match options.mode {
            RotationMode::Replace => requested,
            RotationMode::Relative => intrinsic_rotation(&doc, page_id).then(requested),
        };

        set_page_rotation(&mut doc, page_id, target)?;
    }

    if options.compress {
        doc.compress();
    }

    let mut output = Vec::with_capacity(input.len());
    doc.save_to(&mut output)
        .map_err(|e| PdfRotateError::failed_to_encode(e.to_string()))?;

    Ok(output)
}

fn intrinsic_rotation(doc: &Document, page_id: ObjectId) -> PageRotation {
    inherited_attribute(doc, page_id, b"Rotate")
        .and_then(|rotate| rotate.as_i64().ok())
        .map(PageRotation::normalize)
        .unwrap_or_default()
}

fn set_page_rotation(doc: &mut Document, page_id: ObjectId, rotation: PageRotation) -> Result<()> {
    let page_obj = doc.get_object_mut(page_id).map_err(|e| {
        PdfRotateError::corrupted_pdf("input document", format!("Failed to get page: {e}"))
    })?;

    if let Object::Dictionary(dict) = page_obj {
        dict.set("Rotate", Object::Integer(rotation.as_degrees()));
        Ok(())
    } else {
        Err(PdfRotateError::corrupted_pdf(
            "input document",
            "Page object is not a dictionary",
        ))
    }
}

/// Holds the processing flag for as long as it lives.
///
/// Acquiring dispatches `SetProcessing(true)`; dropping dispatches
/// `SetProcessing(false)`, whichever way the export ends.
pub struct ProcessingGuard<'a> {
    store: &'a mut RotationStore,
}

impl<'a> ProcessingGuard<'a> {
    /// Raise the processing flag.
    pub fn acquire(store: &'a mut RotationStore) -> Self {
        store.dispatch(Action::SetProcessing(true));
        Self { store }
    }

    /// The guarded store.
    pub fn store(&self) -> &RotationStore {
        &*self.store
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.store.dispatch(Action::SetProcessing(false));
    }
}

/// Runs exports against a store and a loaded document.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    /// Create an exporter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exporter with custom options.
    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Export options in use.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export `document` with the rotations currently in `store`.
    ///
    /// The processing flag is raised for the whole export and cleared on
    /// every exit path. Failures are logged and returned; the store keeps its
    /// rotations so the export can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`PdfRotateError::ExportInProgress`] without touching the flag
    /// when it is already raised, otherwise any decode, encode or save error.
    pub async fn export<S, C>(
        &self,
        store: &mut RotationStore,
        document: &LoadedPdf,
        saver: &S,
        clock: &C,
    ) -> Result<ExportOutcome>
    where
        S: FileSaver,
        C: Clock + ?Sized,
    {
        if store.is_processing() {
            log::warn!("export of {} rejected: already processing", document.name);
            return Err(PdfRotateError::ExportInProgress);
        }

        let guard = ProcessingGuard::acquire(store);
        let snapshot = guard.store().snapshot();
        let result = self.run(snapshot, document, saver, clock).await;
        drop(guard);

        match &result {
            Ok(outcome) => log::debug!(
                "exported {} as {} ({} bytes, {} rotated pages) in {:?}",
                document.name,
                outcome.file_name,
                outcome.output_size,
                outcome.rotated_pages,
                outcome.elapsed
            ),
            Err(err) => log::error!("Error rotating PDF {}: {err}", document.name),
        }

        result
    }

    async fn run<S, C>(
        &self,
        snapshot: RotationSnapshot,
        document: &LoadedPdf,
        saver: &S,
        clock: &C,
    ) -> Result<ExportOutcome>
    where
        S: FileSaver,
        C: Clock + ?Sized,
    {
        let start = Instant::now();

        let rotated_pages = snapshot
            .values()
            .filter(|entry| entry.page_index < document.page_count)
            .filter(|entry| entry.rotation() != PageRotation::None)
            .count();

        let input = Arc::clone(&document.bytes);
        let options = self.options.clone();
        let output = task::spawn_blocking(move || apply_rotations(&input, &snapshot, &options))
            .await
            .map_err(|e| PdfRotateError::other(format!("Export task failed: {e}")))??;

        let file_name = output_file_name(&document.name, clock.now());
        let output_size = output.len() as u64;
        let saved_to = saver.save(&file_name, output).await?;

        Ok(ExportOutcome {
            file_name,
            saved_to,
            page_count: document.page_count,
            rotated_pages,
            output_size,
            elapsed: start.elapsed(),
        })
    }
}
