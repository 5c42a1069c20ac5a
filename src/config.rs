//! Configuration module for gpdf.
//!
//! This module transforms CLI arguments into a validated, normalized
//! configuration that drives the queue-and-merge process. It handles:
//! - Validation of argument combinations
//! - Resolution of conflicting options
//! - Application of defaults

use anyhow::{Result, bail};
use std::path::PathBuf;
use std::time::Duration;

/// Default output file name when none is given.
pub const DEFAULT_OUTPUT_NAME: &str = "GPDF_Unificado.pdf";

/// What to do when a single queued file fails to load or parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Skip the failing file, record it, and continue with the rest
    /// (default). Skipped files are reported in the final summary.
    #[default]
    SkipAndReport,

    /// Abort the entire merge on the first per-file error.
    Abort,
}

/// Cooperative yield cadence for the merge loop.
///
/// Every `every`-th file the loop suspends for `pause` so the scheduler can
/// run other work (progress rendering, signal handling); all other
/// iterations perform a zero-delay tick. Responsiveness tuning, not a
/// correctness contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YieldPolicy {
    /// Pause on every n-th file. Must be at least 1.
    pub every: usize,

    /// Duration of the periodic pause.
    pub pause: Duration,
}

impl Default for YieldPolicy {
    fn default() -> Self {
        Self {
            every: 10,
            pause: Duration::from_millis(10),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for a queue-and-merge run.
///
/// This structure contains all settings needed to perform a merge,
/// derived and validated from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input PDF file paths, already expanded from globs/directories.
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Filter text applied to the rendered queue listing.
    pub filter: String,

    /// Per-file failure handling.
    pub failure_policy: FailurePolicy,

    /// Cooperative yield cadence for the merge loop.
    pub yield_policy: YieldPolicy,

    /// Dry run mode - validate and list without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compress the output document before writing.
    pub compress: bool,

    /// Emit a machine-readable JSON summary on stdout.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTPUT_NAME),
            filter: String::new(),
            failure_policy: FailurePolicy::default(),
            yield_policy: YieldPolicy::default(),
            dry_run: false,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::default(),
            compress: true,
            json: false,
        }
    }
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// Checks for logical inconsistencies and invalid combinations.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two input files are queued
    /// - Verbose and quiet modes are both enabled
    /// - The yield cadence is zero
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.len() < 2 {
            bail!(
                "Need at least 2 files to merge, got {} (queue the files you want combined)",
                self.inputs.len()
            );
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.yield_policy.every == 0 {
            bail!("Yield cadence must be at least 1");
        }

        // Validate that output path is not in inputs
        for input in &self.inputs {
            if input == &self.output {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
