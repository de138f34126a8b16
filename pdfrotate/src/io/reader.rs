//! PDF intake: the file-picking boundary and page discovery.
//!
//! A document enters a session through [`PdfReader`], which:
//! - rejects anything that is not a single readable `.pdf` file
//! - keeps the original bytes untouched for later export
//! - parses the document once to report page count and page geometry
//!
//! # Examples
//!
//! ```no_run
//! use pdfrotate::io::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("scan.pdf")).await?;
//! println!("{} has {} pages", loaded.name, loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfRotateError, Result};
use crate::state::PageRotation;
use crate::utils::{format_file_size, inherited_attribute, rect_dimensions};

/// `%PDF-` must appear within this many leading bytes.
const HEADER_SEARCH_WINDOW: usize = 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// US Letter, used when a page tree carries no `MediaBox`.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Size and intrinsic orientation of one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    /// MediaBox width in points.
    pub width: f32,

    /// MediaBox height in points.
    pub height: f32,

    /// `/Rotate` already present in the file (inherited values included).
    pub intrinsic_rotation: PageRotation,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_PAGE_SIZE.0,
            height: DEFAULT_PAGE_SIZE.1,
            intrinsic_rotation: PageRotation::None,
        }
    }
}

/// A document accepted into a session.
///
/// Holds the original bytes, never a parsed tree: export always rebuilds the
/// output from these bytes.
#[derive(Debug, Clone)]
pub struct LoadedPdf {
    /// File name shown to the user and used to derive the export name.
    pub name: String,

    /// Source path, when the document came from disk.
    pub path: Option<PathBuf>,

    /// Original file contents.
    pub bytes: Arc<[u8]>,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Geometry per page, in document order.
    pub pages: Vec<PageGeometry>,

    /// PDF version from the header.
    pub version: String,

    /// File size in bytes.
    pub file_size: u64,

    /// Time taken to read and inspect the document.
    pub load_time: Duration,
}

impl LoadedPdf {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Reader that validates and inspects one PDF at a time.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Whether documents without pages are rejected.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that accepts documents with no pages.
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Check that a path can be picked as input.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist, is not a regular file,
    /// cannot be accessed, or does not carry a `.pdf` extension.
    pub async fn accept(&self, path: &Path) -> Result<()> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PdfRotateError::file_not_found(path.to_path_buf())
            } else {
                PdfRotateError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if !metadata.is_file() {
            return Err(PdfRotateError::not_a_file(path.to_path_buf()));
        }

        if !has_pdf_extension(path) {
            return Err(PdfRotateError::not_a_pdf(
                path.to_path_buf(),
                "expected a .pdf extension",
            ));
        }

        Ok(())
    }

    /// Load a PDF from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is rejected by [`PdfReader::accept`],
    /// cannot be read, lacks a PDF header, or fails to parse.
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        self.accept(path).await?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| PdfRotateError::FileNotAccessible {
                path: path.to_path_buf(),
                source: e,
            })?;

        if !has_pdf_header(&bytes) {
            return Err(PdfRotateError::not_a_pdf(
                path.to_path_buf(),
                "missing %PDF- header",
            ));
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| PdfRotateError::not_a_file(path.to_path_buf()))?;

        let mut loaded = self.inspect(name, bytes).await?;
        loaded.path = Some(path.to_path_buf());
        Ok(loaded)
    }

    /// Load a PDF from an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer lacks a PDF header or fails to parse.
    pub async fn load_bytes(&self, name: impl Into<String>, bytes: Vec<u8>) -> Result<LoadedPdf> {
        let name = name.into();
        if !has_pdf_header(&bytes) {
            return Err(PdfRotateError::not_a_pdf(
                PathBuf::from(&name),
                "missing %PDF- header",
            ));
        }
        self.inspect(name, bytes).await
    }

    async fn inspect(&self, name: String, bytes: Vec<u8>) -> Result<LoadedPdf> {
        let start = Instant::now();
        let bytes: Arc<[u8]> = bytes.into();
        let shared = Arc::clone(&bytes);
        let task_name = name.clone();

        let (version, pages) = task::spawn_blocking(move || read_structure(&task_name, &shared))
            .await
            .map_err(|e| PdfRotateError::other(format!("Load task failed: {e}")))??;

        if self.verify && pages.is_empty() {
            return Err(PdfRotateError::corrupted_pdf(name, "PDF has no pages"));
        }

        let load_time = start.elapsed();
        log::debug!(
            "loaded {name}: {} pages, {} bytes in {load_time:?}",
            pages.len(),
            bytes.len()
        );

        Ok(LoadedPdf {
            name,
            path: None,
            file_size: bytes.len() as u64,
            bytes,
            page_count: pages.len(),
            pages,
            version,
            load_time,
        })
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_structure(name: &str, bytes: &[u8]) -> Result<(String, Vec<PageGeometry>)> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| PdfRotateError::failed_to_load_pdf(name, e.to_string()))?;

    let pages = doc
        .get_pages()
        .into_values()
        .map(|page_id| {
            let (width, height) = inherited_attribute(&doc, page_id, b"MediaBox")
                .and_then(|media_box| rect_dimensions(&doc, media_box))
                .unwrap_or(DEFAULT_PAGE_SIZE);

            let intrinsic_rotation = inherited_attribute(&doc, page_id, b"Rotate")
                .and_then(|rotate| rotate.as_i64().ok())
                .map(PageRotation::normalize)
                .unwrap_or_default();

            PageGeometry {
                width,
                height,
                intrinsic_rotation,
            }
        })
        .collect();

    Ok((doc.version.clone(), pages))
}

/// Whether the path ends in `.pdf`, ignoring case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Whether `%PDF-` appears near the start of the buffer.
pub fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    window
        .windows(PDF_MAGIC.len())
        .any(|candidate| candidate == PDF_MAGIC)
}
