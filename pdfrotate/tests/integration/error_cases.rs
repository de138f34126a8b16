//! Integration tests for error handling and edge cases.

use pdfrotate::Session;
use pdfrotate::error::PdfRotateError;
use pdfrotate::export::{DirectorySaver, Exporter, MemorySaver, SystemClock};
use pdfrotate::io::{PdfReader, WriteOptions};
use pdfrotate::state::Action;

use crate::common::{fixed_clock, pdf_bytes, temp_dir, write_pdf};

#[tokio::test]
async fn test_error_nonexistent_input() {
    let dir = temp_dir();
    let result = PdfReader::new().load(&dir.path().join("missing.pdf")).await;

    let err = result.unwrap_err();
    assert!(matches!(err, PdfRotateError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_error_wrong_extension() {
    let dir = temp_dir();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, pdf_bytes(1, &[])).unwrap();

    let result = PdfReader::new().load(&path).await;
    assert!(matches!(result, Err(PdfRotateError::NotAPdf { .. })));
}

#[tokio::test]
async fn test_error_directory_input() {
    let dir = temp_dir();
    let path = dir.path().join("folder.pdf");
    std::fs::create_dir(&path).unwrap();

    let result = PdfReader::new().load(&path).await;
    assert!(matches!(result, Err(PdfRotateError::NotAFile { .. })));
}

#[tokio::test]
async fn test_error_text_with_pdf_extension() {
    let dir = temp_dir();
    let path = dir.path().join("fake.pdf");
    std::fs::write(&path, "just some text").unwrap();

    let result = PdfReader::new().load(&path).await;
    assert!(matches!(result, Err(PdfRotateError::NotAPdf { .. })));
}

#[tokio::test]
async fn test_error_export_without_document() {
    let mut session = Session::new();
    session.apply(Action::RotateAll);

    let result = session
        .export(&Exporter::new(), &MemorySaver::new(), &SystemClock)
        .await;
    assert!(matches!(result, Err(PdfRotateError::NoDocument)));
}

#[tokio::test]
async fn test_error_missing_output_directory() {
    let dir = temp_dir();
    let input = write_pdf(dir.path(), "scan.pdf", 1);

    let mut session = Session::new();
    session.open(PdfReader::new().load(&input).await.unwrap());

    let saver = DirectorySaver::new(dir.path().join("does-not-exist"));
    let result = session
        .export(&Exporter::new(), &saver, &fixed_clock())
        .await;

    assert!(result.is_err());
    assert!(!session.state().is_processing);
}

#[tokio::test]
async fn test_overwrite_allowed_with_options() {
    let dir = temp_dir();
    let input = write_pdf(dir.path(), "scan.pdf", 1);

    let mut session = Session::new();
    session.open(PdfReader::new().load(&input).await.unwrap());

    let saver = DirectorySaver::with_options(
        dir.path(),
        WriteOptions {
            overwrite: true,
            ..Default::default()
        },
    );
    let first = session
        .export(&Exporter::new(), &saver, &fixed_clock())
        .await
        .unwrap();
    let second = session
        .export(&Exporter::new(), &saver, &fixed_clock())
        .await
        .unwrap();

    assert_eq!(first.saved_to, second.saved_to);
    assert!(second.saved_to.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_utf8_input_name_exports_into_output_dir() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = temp_dir();
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    std::fs::create_dir(&input_dir).unwrap();
    std::fs::create_dir(&output_dir).unwrap();

    let input = input_dir.join(OsStr::from_bytes(b"scan\xff.pdf"));
    std::fs::write(&input, pdf_bytes(2, &[])).unwrap();

    let document = PdfReader::new().load(&input).await.unwrap();
    assert_eq!(document.name, "scan\u{FFFD}.pdf");

    let mut session = Session::new();
    session.open(document);
    session.apply(Action::Rotate(0));

    let outcome = session
        .export(&Exporter::new(), &DirectorySaver::new(&output_dir), &fixed_clock())
        .await
        .unwrap();

    assert_eq!(outcome.saved_to.parent(), Some(output_dir.as_path()));
    assert!(outcome.file_name.starts_with("scan\u{FFFD}_rotated_"));
    assert!(outcome.saved_to.exists());
    assert_eq!(std::fs::read_dir(&input_dir).unwrap().count(), 1);
}
