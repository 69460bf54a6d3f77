//! On-disk layout of the service and scoped temporary files.
//!
//! Everything the service writes lives under one root directory:
//!
//! - `uploads/` holds incoming multipart file parts for the duration of a request
//! - `public/` holds merged outputs until they have been sent
//! - `templates/` holds the upload form served on `GET /`
//!
//! [`ScratchFile`] ties a path in that layout to a scope: when the guard is
//! dropped the file is removed, whichever way the request ended.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::OutputMode;

/// Directory for incoming uploads.
pub const UPLOADS_DIR: &str = "uploads";

/// Directory for merged outputs.
pub const PUBLIC_DIR: &str = "public";

/// Directory for the upload form.
pub const TEMPLATES_DIR: &str = "templates";

/// File name of the shared output in [`OutputMode::Shared`].
pub const SHARED_OUTPUT_NAME: &str = "merged.pdf";

/// The directory layout rooted at a configurable path.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace rooted at `root`. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create `uploads/`, `public/` and `templates/` if they are missing.
    ///
    /// Safe to call more than once.
    pub async fn init(&self) -> io::Result<()> {
        for dir in [self.uploads_dir(), self.public_dir(), self.templates_dir()] {
            tokio::fs::create_dir_all(&dir).await?;
            debug!(dir = %dir.display(), "ensured directory");
        }

        info!(
            root = %self.root.display(),
            "Required directories (public, uploads, templates) ensured"
        );
        Ok(())
    }

    /// Root directory of the workspace.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scratch directory for uploaded parts.
    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join(UPLOADS_DIR)
    }

    /// Directory holding merged outputs.
    pub fn public_dir(&self) -> PathBuf {
        self.root.join(PUBLIC_DIR)
    }

    /// Directory holding the upload form.
    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR)
    }

    /// Path of the upload form page.
    pub fn index_page(&self) -> PathBuf {
        self.templates_dir().join("index.html")
    }

    /// Allocate a fresh scratch file for one uploaded part.
    ///
    /// The file itself is not created; the guard only owns the name.
    pub fn scratch_file(&self) -> ScratchFile {
        ScratchFile::new(self.uploads_dir().join(Uuid::new_v4().simple().to_string()))
    }

    /// Allocate the output location for one merge.
    pub fn output_file(&self, mode: OutputMode) -> ScratchFile {
        let name = match mode {
            OutputMode::PerRequest => format!("merged-{}.pdf", Uuid::new_v4().simple()),
            OutputMode::Shared => SHARED_OUTPUT_NAME.to_string(),
        };
        ScratchFile::new(self.public_dir().join(name))
    }
}

/// A file path that is deleted when the guard goes out of scope.
///
/// Deleting a file that was never created, or was already removed, is not an
/// error. Any other failure is logged and swallowed.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Take ownership of `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The guarded path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        // Runs inline: callers expect the file gone once the guard drops.
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed scratch file"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!(
                path = %self.path.display(),
                error = %err,
                "Error cleaning up temporary file"
            ),
        }
    }
}
