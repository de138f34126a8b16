//! End-to-end rotation and export flows.

use pdfrotate::Session;
use pdfrotate::error::PdfRotateError;
use pdfrotate::export::{
    DirectorySaver, ExportOptions, Exporter, MemorySaver, RotationMode, SystemClock,
};
use pdfrotate::io::PdfReader;
use pdfrotate::state::{Action, PageRotation};
use std::sync::Arc;

use crate::common::{fixed_clock, page_rotations, pdf_bytes, temp_dir, write_pdf};

async fn open(name: &str, bytes: Vec<u8>) -> Session {
    let document = PdfReader::new()
        .load_bytes(name, bytes)
        .await
        .expect("Failed to load fixture");
    let mut session = Session::new();
    session.open(document);
    session
}

#[tokio::test]
async fn test_rotate_single_page_and_export() {
    let mut session = open("scan.pdf", pdf_bytes(3, &[])).await;
    session.apply(Action::Rotate(1));

    let saver = MemorySaver::new();
    let outcome = session
        .export(&Exporter::new(), &saver, &fixed_clock())
        .await
        .unwrap();

    assert_eq!(outcome.page_count, 3);
    assert_eq!(outcome.rotated_pages, 1);
    let saved = saver.last().unwrap();
    assert_eq!(page_rotations(&saved.bytes), vec![0, 90, 0]);
}

#[tokio::test]
async fn test_full_turn_exports_unrotated() {
    let mut session = open("scan.pdf", pdf_bytes(2, &[])).await;
    session.apply_all([Action::Rotate(0); 4]);
    assert_eq!(session.state().pages[&0].rotation_degrees, 360);

    let saver = MemorySaver::new();
    let outcome = session
        .export(&Exporter::new(), &saver, &fixed_clock())
        .await
        .unwrap();

    assert_eq!(outcome.rotated_pages, 0);
    assert_eq!(page_rotations(&saver.last().unwrap().bytes), vec![0, 0]);
}

#[tokio::test]
async fn test_rotate_all_adds_quarter_turn_everywhere() {
    let mut session = open("scan.pdf", pdf_bytes(2, &[])).await;
    session.apply(Action::Rotate(1));
    session.apply(Action::RotateAll);

    assert_eq!(session.state().rotation_of(0), PageRotation::Clockwise90);
    assert_eq!(session.state().rotation_of(1), PageRotation::Rotate180);

    let saver = MemorySaver::new();
    session
        .export(&Exporter::new(), &saver, &fixed_clock())
        .await
        .unwrap();
    assert_eq!(page_rotations(&saver.last().unwrap().bytes), vec![90, 180]);
}

#[tokio::test]
async fn test_output_name_strips_extension_case_insensitively() {
    let mut session = open("report.PDF", pdf_bytes(1, &[])).await;

    let saver = MemorySaver::new();
    let outcome = session
        .export(&Exporter::new(), &saver, &fixed_clock())
        .await
        .unwrap();

    assert_eq!(outcome.file_name, "report_rotated_2024-05-01T12-30-45-000Z.pdf");
    assert_eq!(saver.last().unwrap().name, outcome.file_name);
}

#[tokio::test]
async fn test_processing_flag_cleared_after_success_and_failure() {
    let mut session = open("scan.pdf", pdf_bytes(1, &[])).await;
    session
        .export(&Exporter::new(), &MemorySaver::new(), &SystemClock)
        .await
        .unwrap();
    assert!(!session.state().is_processing);

    // Loaded fine, then the bytes go bad before export.
    let mut corrupted = PdfReader::new()
        .load_bytes("broken.pdf", pdf_bytes(1, &[]))
        .await
        .unwrap();
    corrupted.bytes = Arc::from(&b"%PDF-1.4 corrupted"[..]);

    let mut session = Session::new();
    session.open(corrupted);
    session.apply(Action::Rotate(0));

    let result = session
        .export(&Exporter::new(), &MemorySaver::new(), &SystemClock)
        .await;
    assert!(matches!(result, Err(PdfRotateError::FailedToLoadPdf { .. })));
    assert!(!session.state().is_processing);
    assert_eq!(session.state().rotation_of(0), PageRotation::Clockwise90);
}

#[tokio::test]
async fn test_export_rejected_while_processing() {
    let mut session = open("scan.pdf", pdf_bytes(1, &[])).await;
    session.apply(Action::SetProcessing(true));

    let saver = MemorySaver::new();
    let result = session
        .export(&Exporter::new(), &saver, &SystemClock)
        .await;

    assert!(matches!(result, Err(PdfRotateError::ExportInProgress)));
    assert!(session.state().is_processing);
    assert!(saver.files().is_empty());
}

#[tokio::test]
async fn test_replace_and_relative_modes() {
    let bytes = pdf_bytes(2, &[(0, 90)]);
    let mut session = open("scan.pdf", bytes).await;
    session.apply(Action::Rotate(0));

    let saver = MemorySaver::new();
    session
        .export(&Exporter::new(), &saver, &fixed_clock())
        .await
        .unwrap();
    assert_eq!(page_rotations(&saver.last().unwrap().bytes), vec![90, 0]);

    let relative = Exporter::with_options(ExportOptions {
        mode: RotationMode::Relative,
        ..Default::default()
    });
    session
        .export(&relative, &saver, &fixed_clock())
        .await
        .unwrap();
    assert_eq!(page_rotations(&saver.last().unwrap().bytes), vec![180, 0]);
}

#[tokio::test]
async fn test_export_to_directory_from_disk() {
    let dir = temp_dir();
    let input = write_pdf(dir.path(), "letter.pdf", 2);
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    let mut session = Session::new();
    session.open(PdfReader::new().load(&input).await.unwrap());
    session.apply(Action::Rotate(1));

    let saver = DirectorySaver::new(&out);
    let outcome = session
        .export(&Exporter::new(), &saver, &fixed_clock())
        .await
        .unwrap();

    assert_eq!(
        outcome.saved_to,
        out.join("letter_rotated_2024-05-01T12-30-45-000Z.pdf")
    );
    let written = std::fs::read(&outcome.saved_to).unwrap();
    assert_eq!(written.len() as u64, outcome.output_size);
    assert_eq!(page_rotations(&written), vec![0, 90]);

    // Same instant again: the file exists and is not replaced.
    let again = session
        .export(&Exporter::new(), &saver, &fixed_clock())
        .await;
    assert!(matches!(again, Err(PdfRotateError::OutputExists { .. })));
    assert!(!session.state().is_processing);
}
