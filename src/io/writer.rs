//! Writing merged PDFs to disk.
//!
//! The document is serialized on a blocking thread, written to a sibling
//! `.part` file and renamed into place, so the final path never holds a
//! half-written PDF.

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::warn;

use crate::error::{MergeError, Result};

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to serialize and write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

/// Serializes documents to files.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    buffer_size: usize,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self { buffer_size: 8192 }
    }

    /// Save `doc` to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Pdf`] if serialization fails and
    /// [`MergeError::Io`] if the file cannot be written or renamed. On error
    /// nothing is left at `path` by this call.
    pub async fn save(&self, mut doc: Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();
        let buffer_size = self.buffer_size;

        let bytes = task::spawn_blocking(move || {
            let mut writer = std::io::BufWriter::with_capacity(buffer_size, Vec::new());
            doc.save_to(&mut writer)?;
            writer.flush()?;
            writer.into_inner().map_err(|e| MergeError::Io(e.into_error()))
        })
        .await
        .map_err(|e| MergeError::Pdf(format!("Write task failed: {e}")))??;

        let part_path = part_path(path);
        if let Err(err) = write_and_rename(&part_path, path, &bytes).await {
            if let Err(cleanup_err) = tokio::fs::remove_file(&part_path).await
                && cleanup_err.kind() != std::io::ErrorKind::NotFound
            {
                warn!(
                    path = %part_path.display(),
                    error = %cleanup_err,
                    "Error cleaning up partial output"
                );
            }
            return Err(err.into());
        }

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size: bytes.len() as u64,
            output_path: path.to_path_buf(),
        })
    }
}

async fn write_and_rename(part_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(part_path, bytes).await?;
    tokio::fs::rename(part_path, path).await
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}
