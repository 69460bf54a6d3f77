//! PDF merging.
//!
//! [`PdfMerger`] is the merge operation used by the HTTP handler: it takes
//! the ordered uploads of one request, concatenates their pages with
//! [`pages::concatenate`] and writes the result to disk.

pub mod job;
pub mod merger;
pub mod pages;

pub use job::UploadedFile;
pub use merger::{MergeOutcome, MergeStatistics, PdfMerger, merge_pdfs};
