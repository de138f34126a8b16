//! One document session: the loaded file plus its rotation store.
//!
//! The host creates a [`Session`] and passes it by reference to whatever needs
//! it. Loading a new document fully replaces the previous one.

use crate::error::{PdfRotateError, Result};
use crate::export::{Clock, ExportOutcome, Exporter, FileSaver};
use crate::io::LoadedPdf;
use crate::preview::ThumbnailSheet;
use crate::state::{Action, RotationState, RotationStore};

/// A loaded document and its rotation state.
#[derive(Debug, Default)]
pub struct Session {
    document: Option<LoadedPdf>,
    store: RotationStore,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current document.
    ///
    /// Rotation and size are reset because the file changed; one entry per
    /// page is then seeded as pages are discovered. The two steps stay
    /// separate actions.
    pub fn open(&mut self, document: LoadedPdf) {
        log::debug!("opening {} ({} pages)", document.name, document.page_count);

        self.store.dispatch(Action::ResetSize);
        self.store.dispatch(Action::ResetRotation);
        self.store
            .dispatch_all((0..document.page_count).map(Action::InitPage));

        self.document = Some(document);
    }

    /// Remove the current document and start from a fresh state.
    pub fn close(&mut self) -> Option<LoadedPdf> {
        self.store.dispatch_all([
            Action::ResetRotation,
            Action::ResetSize,
            Action::SetProcessing(false),
        ]);
        self.document.take()
    }

    /// Clear every rotation and seed fresh entries for the loaded pages.
    pub fn reset_rotations(&mut self) {
        self.store.dispatch(Action::ResetRotation);
        if let Some(document) = &self.document {
            self.store
                .dispatch_all((0..document.page_count).map(Action::InitPage));
        }
    }

    /// Apply a state action.
    pub fn apply(&mut self, action: Action) {
        self.store.dispatch(action);
    }

    /// Apply several state actions in order.
    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        self.store.dispatch_all(actions);
    }

    /// The loaded document, if any.
    pub fn document(&self) -> Option<&LoadedPdf> {
        self.document.as_ref()
    }

    /// Current rotation state.
    pub fn state(&self) -> &RotationState {
        self.store.state()
    }

    /// Whether a document is loaded.
    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Preview layout for the loaded document.
    pub fn thumbnails(&self) -> Option<ThumbnailSheet> {
        self.document
            .as_ref()
            .map(|document| ThumbnailSheet::build(document, self.store.state()))
    }

    /// Export the loaded document with the current rotations.
    ///
    /// # Errors
    ///
    /// Returns [`PdfRotateError::NoDocument`] when nothing is loaded, otherwise
    /// whatever [`Exporter::export`] returns.
    pub async fn export<S, C>(
        &mut self,
        exporter: &Exporter,
        saver: &S,
        clock: &C,
    ) -> Result<ExportOutcome>
    where
        S: FileSaver,
        C: Clock + ?Sized,
    {
        let document = self.document.as_ref().ok_or(PdfRotateError::NoDocument)?;
        exporter
            .export(&mut self.store, document, saver, clock)
            .await
    }
}
