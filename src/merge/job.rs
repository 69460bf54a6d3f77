//! Inputs of a merge.

use std::path::{Path, PathBuf};

/// One PDF submitted with a merge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Filename the client sent, if any. Only used for logs and messages.
    pub original_name: Option<String>,

    /// Where the uploaded bytes were stored.
    pub path: PathBuf,

    /// Size of the upload in bytes.
    pub size: u64,
}

impl UploadedFile {
    /// Describe an upload stored at `path`.
    pub fn new(original_name: Option<String>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            original_name,
            path: path.into(),
            size,
        }
    }

    /// Client filename, or `unknown`.
    pub fn display_name(&self) -> &str {
        self.original_name.as_deref().unwrap_or("unknown")
    }

    /// The temp path, or `None` when it is empty.
    pub fn temp_path(&self) -> Option<&Path> {
        if self.path.as_os_str().is_empty() {
            None
        } else {
            Some(&self.path)
        }
    }
}
