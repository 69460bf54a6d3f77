//! # pdfmerge
//!
//! A small HTTP service that merges uploaded PDF files.
//!
//! `GET /` serves an upload form. `POST /merge` takes a `multipart/form-data`
//! body with 2 to 10 files in the `pdf` field and answers with a single PDF
//! containing every page of every upload, in the order the files were sent.
//!
//! ## Library usage
//!
//! The merge operation can be used without the HTTP layer:
//!
//! ```no_run
//! use pdfmerge::merge::{UploadedFile, merge_pdfs};
//! use std::path::Path;
//!
//! # async fn example() -> pdfmerge::Result<()> {
//! let files = vec![
//!     UploadedFile::new(Some("a.pdf".into()), "uploads/a", 1024),
//!     UploadedFile::new(Some("b.pdf".into()), "uploads/b", 2048),
//! ];
//! let output = merge_pdfs(&files, Path::new("public/merged.pdf")).await?;
//! println!("Merged into {}", output.display());
//! # Ok(())
//! # }
//! ```
//!
//! Note that a successful merge deletes the input files.

pub mod cli;
pub mod config;
mod error;
pub use error::*;
pub mod io;
pub mod merge;
pub mod server;
pub(crate) mod utils;
pub mod workspace;

/// Smallest number of files a merge accepts.
pub const MIN_MERGE_FILES: usize = 2;

/// Largest number of files accepted per request by default.
pub const MAX_MERGE_FILES: usize = 10;

/// Filename offered to the client for the merged document.
pub const MERGED_FILENAME: &str = "merged.pdf";

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
