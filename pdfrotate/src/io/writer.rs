//! Writing exported PDFs to disk.
//!
//! Writes are atomic by default (write to a temp file, then rename) and
//! refuse to replace an existing file unless overwriting is enabled.
//!
//! # Examples
//!
//! ```no_run
//! use pdfrotate::io::PdfWriter;
//! use std::path::Path;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.write(&bytes, Path::new("scan_rotated.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use std::fs::OpenOptions;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::Builder;
use tokio::task;

use crate::error::{PdfRotateError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Replace an existing file at the target path.
    pub overwrite: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            overwrite: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Write PDF bytes to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target exists and overwriting is disabled
    /// - The file cannot be created or written
    /// - The atomic rename fails
    pub async fn write(&self, bytes: &[u8], path: &Path) -> Result<WriteStatistics> {
        if !self.options.overwrite && self.exists(path).await {
            return Err(PdfRotateError::output_exists(path.to_path_buf()));
        }

        let path_buf = path.to_path_buf();
        let options = self.options.clone();
        let bytes = bytes.to_vec();

        task::spawn_blocking(move || write_blocking(&bytes, path_buf, &options))
            .await
            .map_err(|e| PdfRotateError::other(format!("Write task failed: {e}")))?
    }

    /// Check that the parent directory of `path` exists and is writable.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing or read-only.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let metadata = tokio::fs::metadata(parent).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PdfRotateError::invalid_config(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    ))
                } else {
                    PdfRotateError::FileNotAccessible {
                        path: parent.to_path_buf(),
                        source: e,
                    }
                }
            })?;

            if !metadata.is_dir() {
                return Err(PdfRotateError::invalid_config(format!(
                    "Output path is not a directory: {}",
                    parent.display()
                )));
            }

            if metadata.permissions().readonly() {
                return Err(PdfRotateError::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

fn write_blocking(bytes: &[u8], path: PathBuf, options: &WriteOptions) -> Result<WriteStatistics> {
    let start = Instant::now();

    if options.atomic {
        write_atomic(bytes, &path, options)?;
    } else {
        write_direct(bytes, &path, options)?;
    }

    let file_size = std::fs::metadata(&path)
        .map(|m| m.len())
        .unwrap_or(bytes.len() as u64);

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size,
        output_path: path,
    })
}

/// Write into a uniquely named sibling, then move it into place.
///
/// The temp file is removed whenever this returns an error. Without
/// `overwrite` the final move refuses to replace a file that appeared
/// after the existence check.
fn write_atomic(bytes: &[u8], path: &Path, options: &WriteOptions) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut builder = Builder::new();
    builder.prefix(".pdfrotate-").suffix(".part");
    // Same mode a plain `File::create` would give the output.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }

    let temp = builder
        .tempfile_in(dir)
        .map_err(|e| PdfRotateError::FailedToCreateOutput {
            path: path.to_path_buf(),
            source: e,
        })?;

    {
        let mut writer = BufWriter::with_capacity(options.buffer_size, temp.as_file());
        writer
            .write_all(bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| PdfRotateError::FailedToWrite {
                path: temp.path().to_path_buf(),
                source: e,
            })?;
    }

    let persisted = if options.overwrite {
        temp.persist(path)
    } else {
        temp.persist_noclobber(path)
    };

    persisted.map(drop).map_err(|e| {
        if !options.overwrite && e.error.kind() == ErrorKind::AlreadyExists {
            PdfRotateError::output_exists(path.to_path_buf())
        } else {
            PdfRotateError::FailedToWrite {
                path: path.to_path_buf(),
                source: e.error,
            }
        }
    })
}

fn write_direct(bytes: &[u8], path: &Path, options: &WriteOptions) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .create_new(!options.overwrite)
        .open(path)
        .map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                PdfRotateError::output_exists(path.to_path_buf())
            } else {
                PdfRotateError::FailedToCreateOutput {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

    let mut writer = BufWriter::with_capacity(options.buffer_size, file);
    let written = writer.write_all(bytes).and_then(|()| writer.flush());
    drop(writer);

    written.map_err(|e| {
        if let Err(cleanup) = std::fs::remove_file(path) {
            log::warn!("could not remove partial {}: {cleanup}", path.display());
        }
        PdfRotateError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        }
    })
}
