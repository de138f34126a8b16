//! Exporting the rotated document.
//!
//! - [`pipeline`]: rebuilds the PDF from the original bytes and a rotation
//!   snapshot, guarding the processing flag
//! - [`naming`]: `{base}_rotated_{timestamp}.pdf` file names and clocks
//! - [`saver`]: the file-save mechanism (directory or memory)
//!
//! # Examples
//!
//! ```no_run
//! use pdfrotate::export::{DirectorySaver, Exporter, SystemClock};
//! use pdfrotate::io::PdfReader;
//! use pdfrotate::state::{Action, RotationStore};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let document = PdfReader::new().load(Path::new("scan.pdf")).await?;
//! let mut store = RotationStore::new();
//! store.dispatch_all((0..document.page_count).map(Action::InitPage));
//! store.dispatch(Action::Rotate(0));
//!
//! let saver = DirectorySaver::new(".");
//! let outcome = Exporter::new()
//!     .export(&mut store, &document, &saver, &SystemClock)
//!     .await?;
//! println!("Saved {}", outcome.saved_to.display());
//! # Ok(())
//! # }
//! ```

pub mod naming;
pub mod pipeline;
pub mod saver;

pub use naming::{Clock, FixedClock, SystemClock, base_name, output_file_name};
pub use pipeline::{
    ExportOptions, ExportOutcome, Exporter, ProcessingGuard, RotationMode, apply_rotations,
};
pub use saver::{DirectorySaver, FileSaver, MemorySaver, SavedFile};
