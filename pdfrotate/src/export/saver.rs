//! Where exported documents go.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{PdfRotateError, Result};
use crate::io::{PdfWriter, WriteOptions};

/// The host's file-save mechanism.
pub trait FileSaver {
    /// Persist `bytes` under `file_name`, returning where they ended up.
    fn save(&self, file_name: &str, bytes: Vec<u8>) -> impl Future<Output = Result<PathBuf>> + Send;
}

/// Saves into a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
    writer: PdfWriter,
}

impl DirectorySaver {
    /// Save into `dir`, refusing to replace existing files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            writer: PdfWriter::new(),
        }
    }

    /// Save into `dir` with explicit write options.
    pub fn with_options(dir: impl Into<PathBuf>, options: WriteOptions) -> Self {
        Self {
            dir: dir.into(),
            writer: PdfWriter::with_options(options),
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSaver for DirectorySaver {
    async fn save(&self, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf> {
        // Only the last component is used; the file always lands in `dir`.
        let name = Path::new(file_name).file_name().ok_or_else(|| {
            PdfRotateError::invalid_config(format!("Invalid output file name: {file_name}"))
        })?;
        let target = self.dir.join(name);
        self.writer.can_write(&target).await?;
        let stats = self.writer.write(&bytes, &target).await?;
        log::debug!(
            "wrote {} ({}) in {:?}",
            stats.output_path.display(),
            stats.format_file_size(),
            stats.write_time
        );
        Ok(stats.output_path)
    }
}

/// A file kept in memory by [`MemorySaver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// Generated file name.
    pub name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Keeps saved files in memory; used for dry runs.
#[derive(Debug, Default)]
pub struct MemorySaver {
    files: Mutex<Vec<SavedFile>>,
}

impl MemorySaver {
    /// Create an empty saver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything saved so far, oldest first.
    pub fn files(&self) -> Vec<SavedFile> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recently saved file.
    pub fn last(&self) -> Option<SavedFile> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl FileSaver for MemorySaver {
    async fn save(&self, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SavedFile {
                name: file_name.to_owned(),
                bytes,
            });
        Ok(PathBuf::from(file_name))
    }
}
