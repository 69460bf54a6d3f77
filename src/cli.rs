//! CLI argument parsing for pdfmerge.
//!
//! Every flag is optional. Without arguments the server listens on port 3000
//! and uses the current directory as its workspace root.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("Listening on port {}", cli.port);
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::MAX_MERGE_FILES;
use crate::config::{DEFAULT_HOST, DEFAULT_MAX_UPLOAD_SIZE, DEFAULT_PORT};

/// Merge uploaded PDF files over HTTP.
///
/// Serves an upload form on `GET /` and merges the files posted to
/// `POST /merge` into a single PDF download.
#[derive(Parser, Debug)]
#[command(name = "pdfmerge")]
#[command(version)]
#[command(about = "Merge uploaded PDF files over HTTP", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Address to bind to
    #[arg(long, value_name = "ADDR", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, value_name = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Workspace root
    ///
    /// The server creates `uploads/`, `public/` and `templates/` below
    /// this directory on startup if they are missing.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Maximum number of PDF files accepted per request
    #[arg(long, value_name = "N", default_value_t = MAX_MERGE_FILES)]
    pub max_files: usize,

    /// Maximum request body size in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_UPLOAD_SIZE)]
    pub max_upload_size: usize,

    /// Write every merge to the shared `public/merged.pdf`
    ///
    /// Concurrent requests overwrite and delete each other's output in
    /// this mode. Only use it to compare against the legacy service.
    #[arg(long)]
    pub shared_output: bool,

    /// Verbose output - log every file added to a merge
    #[arg(short, long)]
    pub verbose: bool,
}
