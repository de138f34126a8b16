//! Shared helpers for pdfrotate integration tests.
//!
//! Fixtures are generated with lopdf instead of being checked in.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use lopdf::{Document, Object, dictionary};
use pdfrotate::export::FixedClock;
use std::path::{Path, PathBuf};

/// Build a PDF with `pages` letter-sized pages.
///
/// `rotations` sets a `/Rotate` entry on the given 0-based pages.
pub fn pdf_bytes(pages: usize, rotations: &[(usize, i64)]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|index| {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            };
            if let Some((_, degrees)) = rotations.iter().find(|(page, _)| *page == index) {
                page.set("Rotate", *degrees);
            }
            doc.add_object(page).into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("Failed to serialize fixture");
    buffer
}

/// Write a generated PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_bytes(pages, &[])).expect("Failed to write fixture");
    path
}

/// `/Rotate` of every page in document order, 0 when absent.
pub fn page_rotations(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).expect("Output is not a valid PDF");
    doc.get_pages()
        .into_values()
        .map(|id| {
            doc.get_dictionary(id)
                .ok()
                .and_then(|page| page.get(b"Rotate").ok())
                .and_then(|rotate| rotate.as_i64().ok())
                .unwrap_or(0)
        })
        .collect()
}

/// Clock pinned to 2024-05-01T12:30:45Z.
pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap())
}

/// Create a temporary directory for test output.
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}
