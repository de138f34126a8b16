//! Session lifecycle driven by configuration and commands.

use pdfrotate::Session;
use pdfrotate::command::Command;
use pdfrotate::config::{Config, RotationRequest};
use pdfrotate::export::{Exporter, MemorySaver};
use pdfrotate::io::PdfReader;
use pdfrotate::output::{SessionReport, session_lines};
use pdfrotate::state::{Action, MAX_THUMBNAIL_SIZE, MIN_THUMBNAIL_SIZE, PageRotation};
use std::path::PathBuf;

use crate::common::{fixed_clock, page_rotations, pdf_bytes, temp_dir, write_pdf};

#[tokio::test]
async fn test_config_actions_drive_export() {
    let config = Config {
        input: Some(PathBuf::from("scan.pdf")),
        rotations: vec![
            RotationRequest::parse("1").unwrap(),
            RotationRequest::parse("2-3:180").unwrap(),
            RotationRequest::parse("9").unwrap(),
        ],
        rotate_all: 1,
        ..Default::default()
    };
    config.validate().unwrap();

    let document = PdfReader::new()
        .load_bytes("scan.pdf", pdf_bytes(4, &[]))
        .await
        .unwrap();
    let mut session = Session::new();
    let actions = config.actions(document.page_count);
    session.open(document);
    session.apply_all(actions);

    let saver = MemorySaver::new();
    let outcome = session
        .export(&Exporter::new(), &saver, &fixed_clock())
        .await
        .unwrap();

    assert_eq!(outcome.rotated_pages, 4);
    assert_eq!(
        page_rotations(&saver.last().unwrap().bytes),
        vec![180, 270, 270, 90]
    );
}

#[tokio::test]
async fn test_commands_drive_session() {
    let dir = temp_dir();
    let first = write_pdf(dir.path(), "first.pdf", 3);
    let second = write_pdf(dir.path(), "second.pdf", 1);

    let mut session = Session::new();
    let reader = PdfReader::new();

    let script = format!(
        "open {}\nrotate 3\n# ignored\nrotate-all\nzoom-in\n\nzoom-in\nopen {}\nrotate 1\n",
        first.display(),
        second.display()
    );

    let mut opened = Vec::new();
    for line in script.lines() {
        match Command::parse(line).unwrap() {
            Some(Command::Open(path)) => {
                session.open(reader.load(&path).await.unwrap());
                opened.push(session.document().unwrap().name.clone());
            }
            Some(Command::Apply(action)) => {
                session.apply(action);
                if opened.len() == 1 && action == Action::RotateAll {
                    assert_eq!(session.state().rotation_of(2), PageRotation::Rotate180);
                    assert_eq!(session.state().rotation_of(0), PageRotation::Clockwise90);
                }
            }
            Some(other) => panic!("unexpected command {other}"),
            None => {}
        }
    }

    assert_eq!(opened, vec!["first.pdf", "second.pdf"]);
    assert_eq!(session.state().page_count(), 1);
    assert_eq!(session.state().rotation_of(0), PageRotation::Clockwise90);
    assert_eq!(session.state().thumbnail_size, 200);
}

#[tokio::test]
async fn test_zoom_saturates_and_preview_follows() {
    let document = PdfReader::new()
        .load_bytes("scan.pdf", pdf_bytes(2, &[]))
        .await
        .unwrap();
    let mut session = Session::new();
    session.open(document);

    session.apply_all([Action::IncreaseSize; 20]);
    assert_eq!(session.state().thumbnail_size, MAX_THUMBNAIL_SIZE);
    assert!(!session.state().can_zoom_in());

    session.apply_all([Action::DecreaseSize; 20]);
    assert_eq!(session.state().thumbnail_size, MIN_THUMBNAIL_SIZE);

    session.apply(Action::Rotate(0));
    let sheet = session.thumbnails().unwrap();
    assert_eq!(sheet.thumbnail_size, MIN_THUMBNAIL_SIZE);
    assert_eq!(sheet.thumbnails[0].width, 50);
    assert_eq!(sheet.thumbnails[0].height, 65);
    assert_eq!(sheet.thumbnails[0].bounding_box(), (65, 50));
}

#[tokio::test]
async fn test_report_reflects_session() {
    let document = PdfReader::new()
        .load_bytes("scan.pdf", pdf_bytes(2, &[(1, 270)]))
        .await
        .unwrap();
    let mut session = Session::new();
    session.open(document);
    session.apply(Action::Rotate(1));

    let value: serde_json::Value =
        serde_json::from_str(&SessionReport::new(&session).to_json().unwrap()).unwrap();
    assert_eq!(value["pageCount"], 2);
    assert_eq!(value["preview"]["thumbnails"][1]["intrinsicRotation"], 270);
    assert_eq!(value["preview"]["thumbnails"][1]["rotation"], 90);

    let lines = session_lines(&session);
    assert!(lines.iter().any(|line| line == "  Page 2: 90°"));

    session.close();
    assert_eq!(session_lines(&session), vec!["No document loaded"]);
}
