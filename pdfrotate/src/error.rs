//! Error types for pdfrotate.
//!
//! Errors are grouped the same way a user meets them:
//!
//! - **Input errors**: the picked file is missing, not a file, or not a PDF.
//!   These are raised at the intake boundary, before a document reaches the
//!   session.
//! - **Decode/encode errors**: the bytes could not be parsed or re-serialized
//!   during load or export. They end the current attempt only.
//! - **Output errors**: the rotated file could not be written.
//! - **Usage errors**: invalid configuration, invalid interactive command,
//!   export without a document or while one is already running.
//!
//! Rotation state transitions never fail and have no variant here.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfrotate operations.
pub type Result<T> = std::result::Result<T, PdfRotateError>;

/// Main error type for pdfrotate operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfRotateError {
    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Input file is not a PDF (wrong extension or missing `%PDF-` header).
    #[error("Not a PDF file: {}\n  Reason: {reason}", path.display())]
    NotAPdf {
        /// Path to the rejected file.
        path: PathBuf,
        /// Why the file was rejected.
        reason: String,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The document bytes could not be parsed as a PDF.
    #[error("Failed to load PDF: {name}\n  Reason: {reason}")]
    FailedToLoadPdf {
        /// Display name of the document.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// The document parsed but its structure is unusable.
    #[error("Corrupted or invalid PDF: {name}\n  Details: {details}")]
    CorruptedPdf {
        /// Display name of the document.
        name: String,
        /// Details about the corruption.
        details: String,
    },

    /// The rotated document could not be serialized.
    #[error("Failed to encode rotated PDF: {reason}")]
    FailedToEncode {
        /// Reason for the failure.
        reason: String,
    },

    /// Output file already exists and overwriting is disabled.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output directory",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create the output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write the output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An operation needs a loaded document but the session is empty.
    #[error("No document is loaded\n  Hint: open a PDF first")]
    NoDocument,

    /// Export was requested while another export is still running.
    #[error("An export is already in progress")]
    ExportInProgress,

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// An interactive command could not be parsed.
    #[error("Invalid command: {message}\n  Type 'help' for a list of commands")]
    InvalidCommand {
        /// What was wrong with the command.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfRotateError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfRotateError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a NotAPdf error.
    pub fn not_a_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::NotAPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            name: name.into(),
            details: details.into(),
        }
    }

    /// Create a FailedToEncode error.
    pub fn failed_to_encode(reason: impl Into<String>) -> Self {
        Self::FailedToEncode {
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an InvalidCommand error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::InvalidCommand {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if the session can carry on after this error.
    ///
    /// Decode, encode and output failures end one export attempt; the user
    /// may fix the cause and retry with the same rotation state.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::FailedToEncode { .. }
                | Self::OutputExists { .. }
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
                | Self::NoDocument
                | Self::ExportInProgress
                | Self::InvalidCommand { .. }
                | Self::NotAPdf { .. }
                | Self::FileNotFound { .. }
                | Self::NotAFile { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::NotAPdf { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::FailedToEncode { .. } => 6,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::NoDocument => 1,
            Self::ExportInProgress => 1,
            Self::InvalidConfig { .. } => 1,
            Self::InvalidCommand { .. } => 1,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_file_not_found_display() {
        let err = PdfRotateError::file_not_found(PathBuf::from("/tmp/missing.pdf"));
        let msg = format!("{err}");
        assert!(msg.contains("File not found"));
        assert!(msg.contains("missing.pdf"));
    }

    #[test]
    fn test_not_a_pdf_display() {
        let err = PdfRotateError::not_a_pdf(PathBuf::from("notes.txt"), "missing .pdf extension");
        let msg = format!("{err}");
        assert!(msg.contains("Not a PDF"));
        assert!(msg.contains("notes.txt"));
        assert!(msg.contains("extension"));
    }

    #[test]
    fn test_failed_to_load_pdf_display() {
        let err = PdfRotateError::failed_to_load_pdf("bad.pdf", "Invalid file header");
        let msg = format!("{err}");
        assert!(msg.contains("Failed to load PDF"));
        assert!(msg.contains("bad.pdf"));
        assert!(msg.contains("Invalid file header"));
    }

    #[test]
    fn test_output_exists_display() {
        let err = PdfRotateError::output_exists(PathBuf::from("existing.pdf"));
        let msg = format!("{err}");
        assert!(msg.contains("already exists"));
        assert!(msg.contains("--force"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(PdfRotateError::failed_to_load_pdf("x.pdf", "error").is_recoverable());
        assert!(PdfRotateError::failed_to_encode("error").is_recoverable());
        assert!(PdfRotateError::ExportInProgress.is_recoverable());
        assert!(PdfRotateError::NoDocument.is_recoverable());

        assert!(!PdfRotateError::invalid_config("bad").is_recoverable());
        assert!(!PdfRotateError::other("boom").is_recoverable());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            PdfRotateError::file_not_found(PathBuf::from("x")).exit_code(),
            2
        );
        assert_eq!(
            PdfRotateError::failed_to_load_pdf("x", "error").exit_code(),
            3
        );
        assert_eq!(
            PdfRotateError::output_exists(PathBuf::from("x")).exit_code(),
            4
        );
        assert_eq!(PdfRotateError::invalid_config("x").exit_code(), 1);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let err: PdfRotateError = io_err.into();
        assert!(matches!(err, PdfRotateError::Io { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source() {
        let err = PdfRotateError::FailedToWrite {
            path: PathBuf::from("out.pdf"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(PdfRotateError::NoDocument.source().is_none());
    }
}
