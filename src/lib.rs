//! gpdf - Queue, filter, and merge PDF files into a single document.
//!
//! This library provides the state and plumbing behind the `gpdf` binary:
//!
//! - A file queue with numeric-aware name sorting and substring filtering
//! - A sequential, cooperatively-yielding merge driver
//! - Per-file error isolation with a skipped-files summary
//! - Progress reporting
//! - Atomic output writing
//!
//! # Examples
//!
//! ## Queue and merge
//!
//! ```no_run
//! use gpdf::merge::Merger;
//! use gpdf::queue::FileQueue;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut queue = FileQueue::new();
//! queue.add([PathBuf::from("b.pdf"), PathBuf::from("a.pdf")]);
//!
//! let mut merger = Merger::new();
//! let outcome = merger
//!     .merge(&queue.snapshot(), |percent| println!("{percent}%"))
//!     .await?;
//!
//! println!("Merged {} pages", outcome.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```no_run
//! use gpdf::io::{PdfReader, PdfWriter};
//! use gpdf::validation::Validator;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Validate input
//! let validator = Validator::new();
//! let result = validator.validate_file(Path::new("input.pdf")).await?;
//! println!("PDF has {} pages", result.page_count);
//!
//! // Load PDF
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("input.pdf")).await?;
//!
//! // Save PDF
//! let writer = PdfWriter::new();
//! writer.save(&loaded.document, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod queue;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{GpdfError, Result};
pub use queue::FileQueue;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
