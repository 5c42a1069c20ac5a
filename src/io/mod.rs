//! PDF input/output.
//!
//! Reading and parsing queued files, and writing the merged document.

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
