//! PDF reading and loading operations.
//!
//! Queued files are read as raw bytes off the async runtime, then parsed by
//! `lopdf` inside blocking tasks so the event loop is never starved by a
//! large document. Encrypted inputs are surfaced as their own error kind so
//! the merge driver can treat them as skippable.
//!
//! # Examples
//!
//! ```no_run
//! use gpdf::io::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("document.pdf")).await?;
//! println!("Loaded {} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{GpdfError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to read and parse the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedPdf>;

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Whether to verify the document has pages after loading.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that skips verification (faster but less safe).
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Load a single PDF document from a file.
    ///
    /// Reads the file's bytes with `tokio::fs`, then parses them in a
    /// blocking task.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File cannot be read
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF structure is corrupted (no pages)
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let bytes = tokio::fs::read(&path_buf).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GpdfError::file_not_found(path_buf.clone())
            } else {
                GpdfError::FileNotAccessible {
                    path: path_buf.clone(),
                    source: e,
                }
            }
        })?;

        self.load_bytes(bytes, path_buf, start).await
    }

    /// Parse an in-memory byte payload as a PDF document.
    ///
    /// `origin` is the path used in error reports and load metadata.
    pub async fn load_from_bytes(&self, bytes: Vec<u8>, origin: PathBuf) -> Result<LoadedPdf> {
        self.load_bytes(bytes, origin, Instant::now()).await
    }

    async fn load_bytes(
        &self,
        bytes: Vec<u8>,
        path_buf: PathBuf,
        start: Instant,
    ) -> Result<LoadedPdf> {
        let file_size = bytes.len() as u64;

        if bytes.is_empty() {
            return Err(GpdfError::corrupted_pdf(path_buf, "File is empty"));
        }

        let parse_path = path_buf.clone();
        let doc = task::spawn_blocking(move || {
            Document::load_mem(&bytes).map_err(|e| {
                let err_msg = e.to_string();
                if err_msg.contains("encrypt") || err_msg.contains("password") {
                    GpdfError::encrypted_input(parse_path)
                } else {
                    GpdfError::failed_to_load_pdf(parse_path, err_msg)
                }
            })
        })
        .await
        .map_err(|e| GpdfError::other(format!("Load task failed: {e}")))??;

        let page_count = doc.get_pages().len();

        if self.verify && page_count == 0 {
            return Err(GpdfError::corrupted_pdf(path_buf, "PDF has no pages"));
        }

        Ok(LoadedPdf {
            document: doc,
            path: path_buf,
            page_count,
            load_time: start.elapsed(),
            file_size,
        })
    }

    /// Load multiple PDF documents with bounded concurrency.
    ///
    /// Used by the preflight scan (validation, dry run) only; the merge loop
    /// itself loads files one at a time, in queue order. Results are
    /// returned in the same order as the input paths.
    pub async fn load_parallel(&self, paths: &[PathBuf], workers: usize) -> Vec<LoadResult> {
        use futures::stream::{self, StreamExt};

        let workers = workers.max(1);

        let tasks = paths.iter().enumerate().map(|(idx, path)| {
            let path = path.clone();
            let reader = self.clone();
            async move {
                let result = reader.load(&path).await;
                (idx, result)
            }
        });

        let mut indexed_results: Vec<(usize, LoadResult)> = stream::iter(tasks)
            .buffer_unordered(workers)
            .collect::<Vec<_>>()
            .await;

        // Restore input order
        indexed_results.sort_by_key(|(idx, _)| *idx);

        indexed_results
            .into_iter()
            .map(|(_, result)| result)
            .collect()
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
