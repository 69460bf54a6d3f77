//! Receiving multipart uploads into the scratch directory.

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::merge::UploadedFile;
use crate::server::error::ApiError;
use crate::workspace::{ScratchFile, Workspace};

/// Multipart field carrying the PDFs.
pub const FIELD_NAME: &str = "pdf";

/// The files uploaded with one request, in arrival order.
///
/// Owns the scratch files: dropping the batch deletes whatever is still on
/// disk.
#[derive(Debug, Default)]
pub struct UploadBatch {
    files: Vec<UploadedFile>,
    guards: Vec<ScratchFile>,
}

impl UploadBatch {
    /// Uploaded files in arrival order.
    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    fn len(&self) -> usize {
        self.files.len()
    }

    fn push(&mut self, file: UploadedFile, guard: ScratchFile) {
        self.files.push(file);
        self.guards.push(guard);
    }
}

/// Store every `pdf` part of `multipart` in the workspace scratch directory.
///
/// Other fields, and text parts named `pdf`, are skipped. On error, every
/// part stored so far is removed before this returns.
///
/// # Errors
///
/// - [`ApiError::TooManyFiles`] once more than `max_files` parts arrive
/// - [`ApiError::InvalidUpload`] if the body is not valid multipart or
///   exceeds the body limit
/// - [`ApiError::Storage`] if a part cannot be written to disk
pub async fn receive_uploads(
    multipart: &mut Multipart,
    workspace: &Workspace,
    max_files: usize,
) -> Result<UploadBatch, ApiError> {
    let mut batch = UploadBatch::default();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FIELD_NAME) {
            debug!(field = ?field.name(), "ignoring multipart field");
            continue;
        }

        if field.file_name().is_none() {
            debug!(field = FIELD_NAME, "ignoring text part");
            continue;
        }

        if batch.len() >= max_files {
            return Err(ApiError::TooManyFiles { max: max_files });
        }

        let original_name = field.file_name().map(str::to_string);
        let scratch = workspace.scratch_file();
        let size = store_field(field, scratch.path()).await?;

        debug!(
            file = original_name.as_deref().unwrap_or("unknown"),
            size,
            path = %scratch.path().display(),
            "stored upload"
        );

        batch.push(
            UploadedFile::new(original_name, scratch.path(), size),
            scratch,
        );
    }

    Ok(batch)
}

/// Stream one multipart field to `path`.
async fn store_field(mut field: Field<'_>, path: &Path) -> Result<u64, ApiError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    let mut size: u64 = 0;
    while let Some(chunk) = field.chunk().await? {
        size += chunk.len() as u64;
        file.write_all(&chunk)
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;
    }

    file.flush()
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    Ok(size)
}
