//! HTTP surface of the merge service.
//!
//! Two routes:
//!
//! - `GET /` serves the upload form
//! - `POST /merge` accepts `multipart/form-data` with 2 to 10 `pdf` parts and
//!   answers with the merged PDF as an attachment

pub mod download;
pub mod error;
pub mod handlers;
pub mod upload;

use anyhow::{Context, Result, bail};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::merge::PdfMerger;
use crate::workspace::Workspace;

pub use error::ApiError;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Arc<Config>,

    /// Directory layout for uploads, outputs and the form.
    pub workspace: Arc<Workspace>,

    /// The merge operation.
    pub merger: PdfMerger,
}

impl AppState {
    /// Build the state for `config`.
    pub fn new(config: Config) -> Self {
        let workspace = Workspace::new(config.root.clone());
        Self {
            config: Arc::new(config),
            workspace: Arc::new(workspace),
            merger: PdfMerger::new(),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_size;

    Router::new()
        .route("/", get(handlers::index))
        .route("/merge", post(handlers::merge))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Prepare the workspace, bind and serve until Ctrl+C.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.socket_addr()?;
    let state = AppState::new(config);

    state.workspace.init().await.with_context(|| {
        format!(
            "Failed to create workspace directories under {}",
            state.workspace.root().display()
        )
    })?;

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) if err.kind() == io::ErrorKind::AddrInUse => {
            error!(
                "Port {} is already in use. Please stop the other process or use a different port.",
                addr.port()
            );
            bail!("Port {} is already in use", addr.port());
        }
        Err(err) => {
            error!(error = %err, "Server error");
            return Err(err).with_context(|| format!("Failed to bind to {addr}"));
        }
    };

    info!("PDF Merger app listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            error!(error = %err, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
