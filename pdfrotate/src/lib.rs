//! pdfrotate - Rotate individual PDF pages and export the result.
//!
//! This library tracks a clockwise rotation for every page of a loaded PDF,
//! in 90 degree steps, together with a thumbnail zoom level and a processing
//! flag. On export it rebuilds the document from the original bytes with each
//! page's `/Rotate` set from the tracked state and hands the result to a file
//! saver under a timestamped name. It supports:
//!
//! - Action-driven rotation state ([`state`])
//! - Thumbnail layout for previews ([`preview`])
//! - Export with a guarded processing flag ([`export`])
//! - Interactive commands ([`command`])
//! - Comprehensive error handling
//!
//! # Examples
//!
//! ## Rotate and export
//!
//! ```no_run
//! use pdfrotate::Session;
//! use pdfrotate::export::{DirectorySaver, Exporter, SystemClock};
//! use pdfrotate::io::PdfReader;
//! use pdfrotate::state::Action;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new();
//! session.open(PdfReader::new().load(Path::new("scan.pdf")).await?);
//! session.apply(Action::Rotate(1));
//! session.apply(Action::RotateAll);
//!
//! let saver = DirectorySaver::new("out");
//! let outcome = session.export(&Exporter::new(), &saver, &SystemClock).await?;
//! println!("Saved {}", outcome.saved_to.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the store directly
//!
//! ```
//! use pdfrotate::state::{Action, PageRotation, RotationStore};
//!
//! let mut store = RotationStore::new();
//! store.dispatch_all([Action::InitPage(0), Action::InitPage(1)]);
//! store.dispatch(Action::Rotate(1));
//! store.dispatch(Action::Rotate(1));
//!
//! assert_eq!(store.state().rotation_of(0), PageRotation::None);
//! assert_eq!(store.state().rotation_of(1), PageRotation::Rotate180);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod io;
pub mod output;
pub mod preview;
pub mod session;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfRotateError, Result};
pub use session::Session;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
