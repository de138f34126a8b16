//! Per-page rotation, thumbnail zoom and processing status.
//!
//! All mutation goes through [`Action`]s. [`reduce`] is the pure transition
//! function; [`RotationStore`] owns one [`RotationState`] and applies actions
//! to it in place.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::rotation::PageRotation;

/// Smallest thumbnail edge in pixels.
pub const MIN_THUMBNAIL_SIZE: u32 = 50;

/// Largest thumbnail edge in pixels.
pub const MAX_THUMBNAIL_SIZE: u32 = 500;

/// Zoom step in pixels.
pub const THUMBNAIL_SIZE_STEP: u32 = 50;

/// Thumbnail edge after startup and after every reset.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 200;

/// Rotation tracked for one page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRotationEntry {
    /// 0-based page position.
    pub page_index: usize,

    /// Accumulated clockwise rotation. Grows by 90 per rotate action and is
    /// never reduced; read it through [`PageRotationEntry::rotation`].
    pub rotation_degrees: i64,
}

impl PageRotationEntry {
    /// Create an unrotated entry.
    pub fn new(page_index: usize) -> Self {
        Self {
            page_index,
            rotation_degrees: 0,
        }
    }

    /// Normalized rotation for display and export.
    pub fn rotation(&self) -> PageRotation {
        PageRotation::normalize(self.rotation_degrees)
    }
}

/// Snapshot of the page map handed to the export pipeline.
pub type RotationSnapshot = BTreeMap<usize, PageRotationEntry>;

/// Everything the store tracks for one document session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationState {
    /// One entry per discovered page, keyed by page index.
    pub pages: BTreeMap<usize, PageRotationEntry>,

    /// Thumbnail edge in pixels, always within
    /// [`MIN_THUMBNAIL_SIZE`]..=[`MAX_THUMBNAIL_SIZE`].
    pub thumbnail_size: u32,

    /// True only while an export runs.
    pub is_processing: bool,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            pages: BTreeMap::new(),
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            is_processing: false,
        }
    }
}

impl RotationState {
    /// Normalized rotation of a page; pages without an entry are unrotated.
    pub fn rotation_of(&self, page_index: usize) -> PageRotation {
        self.pages
            .get(&page_index)
            .map(PageRotationEntry::rotation)
            .unwrap_or_default()
    }

    /// Number of page entries.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of pages whose normalized rotation is not zero.
    pub fn rotated_page_count(&self) -> usize {
        self.pages
            .values()
            .filter(|entry| entry.rotation() != PageRotation::None)
            .count()
    }

    /// Whether zooming in would change the size.
    pub fn can_zoom_in(&self) -> bool {
        self.thumbnail_size < MAX_THUMBNAIL_SIZE
    }

    /// Whether zooming out would change the size.
    pub fn can_zoom_out(&self) -> bool {
        self.thumbnail_size > MIN_THUMBNAIL_SIZE
    }
}

/// The closed set of state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Seed an unrotated entry for a page if it has none.
    InitPage(usize),
    /// Add a quarter turn to one page; no-op if the page has no entry.
    Rotate(usize),
    /// Add a quarter turn to every existing entry.
    RotateAll,
    /// Drop every page entry.
    ResetRotation,
    /// Grow thumbnails by one step, saturating at the maximum.
    IncreaseSize,
    /// Shrink thumbnails by one step, saturating at the minimum.
    DecreaseSize,
    /// Restore the default thumbnail size.
    ResetSize,
    /// Set the processing flag.
    SetProcessing(bool),
}

/// Apply an action to a state, returning the next state.
///
/// Total over its domain: missing pages and out-of-range sizes turn into
/// no-ops or clamps, never errors.
pub fn reduce(state: &RotationState, action: Action) -> RotationState {
    let mut next = state.clone();
    apply(&mut next, action);
    next
}

fn apply(state: &mut RotationState, action: Action) {
    match action {
        Action::InitPage(page_index) => {
            state
                .pages
                .entry(page_index)
                .or_insert_with(|| PageRotationEntry::new(page_index));
        }
        Action::Rotate(page_index) => {
            if let Some(entry) = state.pages.get_mut(&page_index) {
                entry.rotation_degrees += 90;
            }
        }
        Action::RotateAll => {
            for entry in state.pages.values_mut() {
                entry.rotation_degrees += 90;
            }
        }
        Action::ResetRotation => state.pages.clear(),
        Action::IncreaseSize => {
            state.thumbnail_size =
                (state.thumbnail_size + THUMBNAIL_SIZE_STEP).min(MAX_THUMBNAIL_SIZE);
        }
        Action::DecreaseSize => {
            state.thumbnail_size = state
                .thumbnail_size
                .saturating_sub(THUMBNAIL_SIZE_STEP)
                .max(MIN_THUMBNAIL_SIZE);
        }
        Action::ResetSize => state.thumbnail_size = DEFAULT_THUMBNAIL_SIZE,
        Action::SetProcessing(flag) => state.is_processing = flag,
    }
}

/// Sole owner of a [`RotationState`].
#[derive(Debug, Clone, Default)]
pub struct RotationStore {
    state: RotationState,
}

impl RotationStore {
    /// Create a store with a fresh state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &RotationState {
        &self.state
    }

    /// Apply an action in place.
    pub fn dispatch(&mut self, action: Action) {
        log::debug!("dispatch {action:?}");
        apply(&mut self.state, action);
    }

    /// Apply a sequence of actions in order.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    /// Copy of the page map for export.
    pub fn snapshot(&self) -> RotationSnapshot {
        self.state.pages.clone()
    }

    /// Whether an export currently holds the processing flag.
    pub fn is_processing(&self) -> bool {
        self.state.is_processing
    }
}
