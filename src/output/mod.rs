//! Output formatting and display for gpdf.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - The rendered queue listing
//! - Progress indication during the merge
//! - Summary reports
//! - Quiet and verbose modes
//!
//! Presentation only: everything here consumes derived state
//! ([`QueueView`], summaries, statistics) and never mutates it.
//!
//! # Examples
//!
//! ```no_run
//! use gpdf::output::OutputFormatter;
//! use gpdf::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;
pub mod progress;

pub use formatter::{MessageLevel, OutputFormatter};
pub use progress::ProgressBar;

use crate::config::Config;
use crate::merge::SkippedFile;
use crate::queue::QueueView;
use crate::validation::ValidationSummary;

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Render the queue view as a file listing plus status line.
///
/// This is the terminal counterpart of the original file list: visible
/// entries in queue order, then the status text the view derived.
pub fn display_queue_view(formatter: &OutputFormatter, view: &QueueView) {
    for (idx, entry) in view.visible.iter().enumerate() {
        formatter.info(&format!("  {}. {}", idx + 1, entry.name));
    }

    if view.visible.len() < view.total {
        formatter.info(&format!(
            "  ({} of {} shown by filter)",
            view.visible.len(),
            view.total
        ));
    }

    formatter.info(&view.status);
}

/// Display validation summary to the user.
pub fn display_validation_summary(formatter: &OutputFormatter, summary: &ValidationSummary) {
    if summary.files_failed > 0 {
        formatter.warning(&format!(
            "Warning: {} file(s) failed validation",
            summary.files_failed
        ));
    }

    formatter.info(&format!(
        "Validated {} file(s): {} pages, {}",
        summary.files_validated,
        summary.total_pages,
        summary.format_total_size()
    ));
}

/// Display the files the skip policy passed over.
pub fn display_skipped_files(formatter: &OutputFormatter, skipped: &[SkippedFile]) {
    if skipped.is_empty() {
        return;
    }

    formatter.warning(&format!("Skipped {} file(s):", skipped.len()));
    for file in skipped {
        formatter.warning(&format!("  - {}: {}", file.name, file.reason));
    }
}
