//! Sending the merged PDF as an attachment.

use axum::{
    body::Body,
    http::{StatusCode, header},
    response::Response,
};
use futures::Stream;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_util::io::ReaderStream;
use tracing::error;

use crate::server::error::ApiError;
use crate::utils::attachment_disposition;
use crate::workspace::ScratchFile;

/// Build a download response for `output`, offered to the client as
/// `filename`.
///
/// The body owns `output`: the file is removed once the body is dropped,
/// whether the transfer completed or the client went away.
///
/// # Errors
///
/// [`ApiError::Download`] if the output cannot be opened.
pub async fn attachment(output: ScratchFile, filename: &str) -> Result<Response, ApiError> {
    let file = match tokio::fs::File::open(output.path()).await {
        Ok(file) => file,
        Err(err) => {
            error!(
                path = %output.path().display(),
                error = %err,
                "Error sending file for download"
            );
            return Err(ApiError::Download);
        }
    };

    let length = file.metadata().await.map(|meta| meta.len()).ok();
    let stream = GuardedStream {
        inner: ReaderStream::new(file),
        guard: output,
    };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_DISPOSITION, attachment_disposition(filename));
    if let Some(length) = length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }

    builder.body(Body::from_stream(stream)).map_err(|err| {
        error!(error = %err, "Error sending file for download");
        ApiError::Download
    })
}

/// A byte stream that keeps a [`ScratchFile`] alive until it is dropped.
struct GuardedStream<S> {
    inner: S,
    guard: ScratchFile,
}

impl<S, T> Stream for GuardedStream<S>
where
    S: Stream<Item = io::Result<T>> + Unpin,
{
    type Item = io::Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let poll = Pin::new(&mut this.inner).poll_next(cx);
        if let Poll::Ready(Some(Err(err))) = &poll {
            error!(
                path = %this.guard.path().display(),
                error = %err,
                "Error sending file for download"
            );
        }
        poll
    }
}
