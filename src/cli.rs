//! CLI argument parsing for gpdf.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, input expansion, and conversion into a
//! validated [`Config`].
//!
//! # Examples
//!
//! ```no_run
//! use gpdf::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("Queueing {} inputs", cli.inputs.len());
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{Config, DEFAULT_OUTPUT_NAME, FailurePolicy, OverwriteMode, YieldPolicy};
use crate::error::Result;
use crate::utils::collect_input_paths;

/// Queue, filter, and merge PDF files into a single document.
///
/// gpdf queues the given files, sorts them by name (numeric-aware,
/// case-insensitive), and merges every page into one output PDF. Files that
/// cannot be read are skipped and reported unless --abort-on-error is set.
#[derive(Parser, Debug)]
#[command(name = "gpdf")]
#[command(version)]
#[command(about = "Queue, filter, and merge PDF files into a single document", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files, directories, or glob patterns
    ///
    /// Directories are walked recursively and only .pdf files are queued.
    /// The queue is sorted by file name with numeric-aware collation, so
    /// page2.pdf merges before page10.pdf regardless of argument order.
    ///
    /// Examples:
    ///   gpdf scans/ -o book.pdf
    ///   gpdf "chapter*.pdf" annex.pdf
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_NAME)]
    pub output: PathBuf,

    /// Show only queue entries whose name contains this text
    ///
    /// Case-insensitive substring match against the file name. Affects the
    /// printed listing only; the merge always consumes the whole queue.
    #[arg(long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Abort the whole merge on the first unreadable file
    ///
    /// By default problematic files are skipped with a warning and listed
    /// in the final summary.
    #[arg(long)]
    pub abort_on_error: bool,

    /// Pause the merge loop on every n-th file
    ///
    /// Responsiveness tuning for very long queues; the loop performs a
    /// zero-delay yield on all other iterations.
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub yield_every: usize,

    /// Duration of the periodic pause, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 10)]
    pub yield_pause_ms: u64,

    /// Dry run - validate inputs and preview the merge without output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show detailed information about each PDF
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Skip compressing the output document
    #[arg(long)]
    pub no_compress: bool,

    /// Print a machine-readable JSON summary after the merge
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Convert CLI arguments into a [`Config`].
    ///
    /// Expands directories and glob patterns into concrete file paths and
    /// maps the flags onto the config's policies. The returned config still
    /// needs [`Config::validate`].
    ///
    /// # Errors
    ///
    /// Returns an error if input expansion fails (bad glob pattern,
    /// unreadable directory).
    pub fn to_config(&self) -> Result<Config> {
        let inputs = collect_input_paths(&self.inputs)?;

        let failure_policy = if self.abort_on_error {
            FailurePolicy::Abort
        } else {
            FailurePolicy::SkipAndReport
        };

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        Ok(Config {
            inputs,
            output: self.output.clone(),
            filter: self.filter.clone().unwrap_or_default(),
            failure_policy,
            yield_policy: YieldPolicy {
                every: self.yield_every,
                pause: Duration::from_millis(self.yield_pause_ms),
            },
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode,
            compress: !self.no_compress,
            json: self.json,
        })
    }
}
