//! Document intake and file output.

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PageGeometry, PdfReader, has_pdf_extension, has_pdf_header};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
