//! Loading uploaded PDFs from their temp paths.
//!
//! The file bytes are read with async I/O; parsing happens in memory once the
//! read has completed.

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{MergeError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path the document was read from.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Size of the source file in bytes.
    pub file_size: u64,

    /// Time taken to read and parse the file.
    pub load_time: Duration,
}

/// Reads PDF files into [`lopdf::Document`]s.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Io`] if the file cannot be read and
    /// [`MergeError::Pdf`] with the parser's message if it is not a valid PDF.
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let start = Instant::now();

        let bytes = tokio::fs::read(path).await?;
        let document = Document::load_mem(&bytes).map_err(MergeError::from)?;
        let page_count = document.get_pages().len();

        Ok(LoadedPdf {
            document,
            path: path.to_path_buf(),
            page_count,
            file_size: bytes.len() as u64,
            load_time: start.elapsed(),
        })
    }
}
