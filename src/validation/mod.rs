//! Input validation for gpdf.
//!
//! This module provides validation of queued PDF files and configuration
//! before the merge runs. It performs:
//! - File existence and accessibility checks
//! - PDF format validation and page count extraction
//! - Encryption detection
//! - Output path validation
//!
//! The batch scan loads files with bounded concurrency; this is preflight
//! work only and never overlaps with the sequential merge loop.
//!
//! # Examples
//!
//! ```no_run
//! use gpdf::validation::Validator;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! let result = validator.validate_file(Path::new("test.pdf")).await?;
//! println!("PDF has {} pages", result.page_count);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{Config, FailurePolicy, OverwriteMode};
use crate::error::{GpdfError, Result};
use crate::io::{LoadedPdf, PdfReader};

/// Number of files scanned concurrently during preflight.
const SCAN_WORKERS: usize = 4;

/// Result of validating a single PDF file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Path to the validated file.
    pub path: PathBuf,

    /// Number of pages in the PDF.
    pub page_count: usize,

    /// PDF version (major, minor).
    pub version: Option<(u8, u8)>,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Number of objects in the PDF.
    pub object_count: usize,

    /// First page dimensions (width, height) in points, if available.
    pub page_dimensions: Option<(f32, f32)>,
}

impl ValidationResult {
    /// Create a validation result from a loaded PDF.
    fn from_loaded(loaded: &LoadedPdf) -> Self {
        let doc = &loaded.document;

        let version = doc.version.split_once('.').map(|(major, minor)| {
            (
                major.parse::<u8>().unwrap_or_default(),
                minor.parse::<u8>().unwrap_or_default(),
            )
        });

        // First page MediaBox, if the page carries one directly
        let page_dimensions = doc.get_pages().iter().next().and_then(|(_, page_id)| {
            doc.get_object(*page_id).ok().and_then(|page_obj| {
                if let lopdf::Object::Dictionary(page_dict) = page_obj {
                    page_dict.get(b"MediaBox").ok().and_then(|mediabox| {
                        if let lopdf::Object::Array(arr) = mediabox
                            && arr.len() >= 4
                        {
                            let width = arr[2].as_float().ok()?;
                            let height = arr[3].as_float().ok()?;
                            return Some((width, height));
                        }
                        None
                    })
                } else {
                    None
                }
            })
        });

        Self {
            path: loaded.path.clone(),
            page_count: loaded.page_count,
            version,
            file_size: loaded.file_size,
            object_count: doc.objects.len(),
            page_dimensions,
        }
    }
}

/// Summary of validation results for multiple files.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Individual validation results for each readable file.
    pub results: Vec<ValidationResult>,

    /// Total number of pages across all readable files.
    pub total_pages: usize,

    /// Total file size in bytes.
    pub total_size: u64,

    /// Number of files that passed validation.
    pub files_validated: usize,

    /// Number of files that failed validation.
    pub files_failed: usize,
}

impl ValidationSummary {
    /// Create a summary from validation results.
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let total_pages = results.iter().map(|r| r.page_count).sum();
        let total_size = results.iter().map(|r| r.file_size).sum();
        let files_validated = results.len();

        Self {
            results,
            total_pages,
            total_size,
            files_validated,
            files_failed: 0,
        }
    }

    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Validator for queued PDF files and configuration.
pub struct Validator {
    /// Reader used to probe the files.
    reader: PdfReader,
}

impl Validator {
    /// Create a new validator with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
        }
    }

    /// Validate a single PDF file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - File is not a valid PDF
    /// - File is encrypted
    /// - PDF has no pages
    pub async fn validate_file(&self, path: &Path) -> Result<ValidationResult> {
        if !path.exists() {
            return Err(GpdfError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(GpdfError::not_a_file(path.to_path_buf()));
        }

        let loaded = self.reader.load(path).await?;

        Ok(ValidationResult::from_loaded(&loaded))
    }

    /// Validate multiple PDF files.
    ///
    /// Files are probed with bounded concurrency. Under
    /// [`FailurePolicy::SkipAndReport`] failures are counted and reported as
    /// warnings; under [`FailurePolicy::Abort`] the first failure is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if any file fails validation under the abort policy,
    /// or if no file passes at all.
    pub async fn validate_files(
        &self,
        paths: &[PathBuf],
        policy: FailurePolicy,
    ) -> Result<ValidationSummary> {
        let load_results = self.reader.load_parallel(paths, SCAN_WORKERS).await;

        let mut results = Vec::new();
        let mut failed_count = 0;

        for (path, result) in paths.iter().zip(load_results) {
            match result {
                Ok(loaded) => results.push(ValidationResult::from_loaded(&loaded)),
                Err(e) => match policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::SkipAndReport => {
                        eprintln!("Warning: Skipping {}: {}", path.display(), e);
                        failed_count += 1;
                    }
                },
            }
        }

        if results.is_empty() {
            return Err(GpdfError::NoFilesToMerge);
        }

        let mut summary = ValidationSummary::from_results(results);
        summary.files_failed = failed_count;

        Ok(summary)
    }

    /// Validate the output path.
    ///
    /// Checks overwrite scenarios and that the output directory is writable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output file exists and mode is `NoClobber`
    /// - Output directory doesn't exist or is not writable
    pub async fn validate_output(&self, config: &Config) -> Result<()> {
        let output_path = &config.output;

        if output_path.exists() {
            match config.overwrite_mode {
                OverwriteMode::NoClobber => {
                    return Err(GpdfError::output_exists(output_path.clone()));
                }
                OverwriteMode::Prompt => {
                    // Prompt is handled by the caller
                }
                OverwriteMode::Force => {}
            }
        }

        if let Some(parent) = output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            if !parent.exists() {
                return Err(GpdfError::invalid_config(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }

            let metadata =
                tokio::fs::metadata(parent)
                    .await
                    .map_err(|e| GpdfError::FileNotAccessible {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;

            if metadata.permissions().readonly() {
                return Err(GpdfError::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Validate the complete configuration: all inputs, then the output.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation check fails.
    pub async fn validate_config(&self, config: &Config) -> Result<ValidationSummary> {
        let summary = self
            .validate_files(&config.inputs, config.failure_policy)
            .await?;

        self.validate_output(config).await?;

        Ok(summary)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Format file size as human-readable string.
fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
