//! Error responses of the HTTP surface.
//!
//! Every error is answered with a plain-text body; the browser form shows it
//! as-is.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::MergeError;

/// Failure of a request to the merge service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Fewer than two `pdf` parts were uploaded.
    #[error("Please upload at least two PDF files to merge.")]
    InsufficientFiles,

    /// More `pdf` parts than the configured maximum were uploaded.
    #[error("Too many files uploaded. At most {max} PDF files can be merged.")]
    TooManyFiles {
        /// Configured maximum.
        max: usize,
    },

    /// The multipart body could not be read.
    #[error("Invalid upload: {message}")]
    InvalidUpload {
        /// 400, or 413 when the body limit was exceeded.
        status: StatusCode,
        message: String,
    },

    /// An uploaded part could not be stored in the scratch directory.
    #[error("Failed to store uploaded file: {0}")]
    Storage(String),

    /// The merge operation failed.
    #[error("An error occurred during PDF merging: {0}")]
    Merge(#[from] MergeError),

    /// The merged file could not be sent.
    #[error("Error downloading the merged file.")]
    Download,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InsufficientFiles | Self::TooManyFiles { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidUpload { status, .. } => *status,
            Self::Storage(_) | Self::Merge(_) | Self::Download => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::InvalidUpload {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
