//! The merge operation.
//!
//! Loads each uploaded file in order, concatenates their pages, writes the
//! result to the requested output path and then deletes the inputs.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::MIN_MERGE_FILES;
use crate::error::{MergeError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::merge::job::UploadedFile;
use crate::merge::pages;
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total size of input files.
    pub input_size: u64,

    /// Size of the merged file.
    pub output_size: u64,

    /// Total time taken for merge.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Result of a merge operation.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Where the merged PDF was written.
    pub output_path: PathBuf,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// Concatenates uploaded PDFs into one file.
#[derive(Debug, Clone, Default)]
pub struct PdfMerger {
    reader: PdfReader,
    writer: PdfWriter,
}

impl PdfMerger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
            writer: PdfWriter::new(),
        }
    }

    /// Merge `files`, in order, into a single PDF at `output`.
    ///
    /// On success every input temp path has been deleted and the returned
    /// outcome names `output`. When loading or writing fails the inputs are
    /// left where they are.
    ///
    /// # Errors
    ///
    /// - [`MergeError::InsufficientFiles`] if fewer than two files are given
    /// - [`MergeError::MissingPath`] if a file has an empty temp path
    /// - [`MergeError::Pdf`] or [`MergeError::Io`] from loading, concatenating
    ///   or writing
    pub async fn merge(&self, files: &[UploadedFile], output: &Path) -> Result<MergeOutcome> {
        let start = Instant::now();

        if files.len() < MIN_MERGE_FILES {
            return Err(MergeError::InsufficientFiles);
        }

        let mut paths = Vec::with_capacity(files.len());
        for file in files {
            let path = file
                .temp_path()
                .ok_or_else(|| MergeError::missing_path(file.original_name.as_deref()))?;
            paths.push(path);
        }

        let mut documents = Vec::with_capacity(files.len());
        let mut input_size = 0;
        for (idx, (file, path)) in files.iter().zip(&paths).enumerate() {
            debug!(
                "[{}/{}] Adding file: {} from path: {}",
                idx + 1,
                files.len(),
                file.display_name(),
                path.display()
            );

            let loaded = self.reader.load(path).await?;
            debug!(
                pages = loaded.page_count,
                load_time = ?loaded.load_time,
                "loaded {}",
                loaded.path.display()
            );

            input_size += loaded.file_size;
            documents.push(loaded.document);
        }

        let merged = pages::concatenate(documents)?;
        let total_pages = merged.get_pages().len();

        let written = self.writer.save(merged, output).await?;
        debug!(write_time = ?written.write_time, "wrote {}", written.output_path.display());

        for path in &paths {
            remove_input(path).await;
        }

        let statistics = MergeStatistics {
            files_merged: files.len(),
            total_pages,
            input_size,
            output_size: written.file_size,
            merge_time: start.elapsed(),
        };

        info!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            input = %statistics.format_input_size(),
            output = %statistics.format_output_size(),
            elapsed = ?statistics.merge_time,
            "merged PDF written to {}",
            output.display()
        );

        Ok(MergeOutcome {
            output_path: written.output_path,
            statistics,
        })
    }
}

async fn remove_input(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        warn!(
            path = %path.display(),
            error = %err,
            "Error cleaning up temporary file"
        );
    }
}

/// Merge `files` into `output` with a default [`PdfMerger`].
pub async fn merge_pdfs(files: &[UploadedFile], output: &Path) -> Result<PathBuf> {
    let outcome = PdfMerger::new().merge(files, output).await?;
    Ok(outcome.output_path)
}
