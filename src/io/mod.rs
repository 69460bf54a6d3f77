//! File I/O for merge inputs and outputs.
//!
//! - [`PdfReader`] reads an uploaded file and parses it
//! - [`PdfWriter`] serializes a document and moves it into place

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteStatistics};
