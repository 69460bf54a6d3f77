//! Route handlers.

use axum::{
    extract::{Multipart, State},
    response::{Html, Response},
};
use std::io;
use tracing::{debug, error, info, instrument, warn};

use crate::merge::UploadedFile;
use crate::server::AppState;
use crate::server::download;
use crate::server::error::ApiError;
use crate::server::upload::{UploadBatch, receive_uploads};
use crate::{MERGED_FILENAME, MIN_MERGE_FILES};

/// Upload form served when the workspace has no `templates/index.html`.
const DEFAULT_INDEX: &str = include_str!("../../templates/index.html");

/// `GET /`: the upload form.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let page = state.workspace.index_page();
    match tokio::fs::read_to_string(&page).await {
        Ok(html) => Html(html),
        Err(err) => {
            if err.kind() != io::ErrorKind::NotFound {
                warn!(path = %page.display(), error = %err, "failed to read upload form");
            }
            Html(DEFAULT_INDEX.to_string())
        }
    }
}

/// `POST /merge`: merge the uploaded `pdf` parts and send back the result.
///
/// A request without a multipart body is treated as one without files.
#[instrument(skip_all)]
pub async fn merge(
    State(state): State<AppState>,
    multipart: Option<Multipart>,
) -> Result<Response, ApiError> {
    let batch = match multipart {
        Some(mut multipart) => {
            receive_uploads(&mut multipart, &state.workspace, state.config.max_files).await?
        }
        None => UploadBatch::default(),
    };

    let received = batch.files().len();
    if received < MIN_MERGE_FILES {
        warn!(received, "rejected merge with too few files");
        return Err(ApiError::InsufficientFiles);
    }

    info!(files = received, "merge requested");
    merge_uploads(&state, batch.files()).await
}

/// Merge `files` into a fresh output and answer with it as a download.
///
/// The output is removed once the response body has been sent or dropped.
pub async fn merge_uploads(state: &AppState, files: &[UploadedFile]) -> Result<Response, ApiError> {
    let output = state.workspace.output_file(state.config.output_mode);

    let outcome = state
        .merger
        .merge(files, output.path())
        .await
        .map_err(|err| {
            if err.is_validation() {
                warn!(error = %err, "PDF Merging Error");
            } else {
                error!(error = %err, "PDF Merging Error");
            }
            ApiError::from(err)
        })?;

    debug!(
        path = %outcome.output_path.display(),
        pages = outcome.statistics.total_pages,
        size = %outcome.statistics.format_output_size(),
        "sending merged file"
    );

    download::attachment(output, MERGED_FILENAME).await
}
