//! Thumbnail layout for the page preview.
//!
//! Nothing here rasterizes. A [`ThumbnailSheet`] tells a renderer which page
//! to paint, at what size, and with which rotation applied, derived from the
//! loaded document's page geometry and the current [`RotationState`].

use serde::Serialize;

use crate::io::{LoadedPdf, PageGeometry};
use crate::state::{PageRotation, RotationState};

/// Render instructions for one page preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    /// 0-based page position.
    pub page_index: usize,

    /// Accumulated rotation from the store, for renderers that animate.
    pub rotation_degrees: i64,

    /// Normalized rotation to display.
    pub rotation: PageRotation,

    /// Rotation already stored in the file, which the renderer applies first.
    pub intrinsic_rotation: PageRotation,

    /// Rendered page width in pixels, before the display rotation.
    pub width: u32,

    /// Rendered page height in pixels, before the display rotation.
    pub height: u32,
}

impl Thumbnail {
    fn layout(page_index: usize, geometry: &PageGeometry, state: &RotationState) -> Self {
        let size = state.thumbnail_size;
        let (page_w, page_h) = if geometry.intrinsic_rotation.is_sideways() {
            (geometry.height, geometry.width)
        } else {
            (geometry.width, geometry.height)
        };

        let height = if page_w > 0.0 {
            ((size as f32) * page_h / page_w).round().max(1.0) as u32
        } else {
            size
        };

        let rotation_degrees = state
            .pages
            .get(&page_index)
            .map(|entry| entry.rotation_degrees)
            .unwrap_or(0);

        Self {
            page_index,
            rotation_degrees,
            rotation: PageRotation::normalize(rotation_degrees),
            intrinsic_rotation: geometry.intrinsic_rotation,
            width: size,
            height,
        }
    }

    /// Bounding box `(width, height)` after the display rotation.
    pub fn bounding_box(&self) -> (u32, u32) {
        if self.rotation.is_sideways() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// 1-based page number, as shown under the preview.
    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }
}

/// Previews for every page of a loaded document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailSheet {
    /// Thumbnail slot width in pixels.
    pub thumbnail_size: u32,

    /// One entry per page, in document order.
    pub thumbnails: Vec<Thumbnail>,
}

impl ThumbnailSheet {
    /// Lay out previews for `document` under `state`.
    pub fn build(document: &LoadedPdf, state: &RotationState) -> Self {
        let thumbnails = document
            .pages
            .iter()
            .enumerate()
            .map(|(index, geometry)| Thumbnail::layout(index, geometry, state))
            .collect();

        Self {
            thumbnail_size: state.thumbnail_size,
            thumbnails,
        }
    }

    /// Number of previews.
    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    /// Whether the sheet has no previews.
    pub fn is_empty(&self) -> bool {
        self.thumbnails.is_empty()
    }
}
