//! gpdf - Queue, filter, and merge PDF files into a single document.

use clap::Parser;
use std::process;

use gpdf::cli::Cli;
use gpdf::config::Config;
use gpdf::error::GpdfError;
use gpdf::io::PdfWriter;
use gpdf::merge::{MergeReport, Merger};
use gpdf::output::{
    OutputFormatter, ProgressBar, display_queue_view, display_skipped_files,
    display_validation_summary,
};
use gpdf::queue::FileQueue;
use gpdf::validation::Validator;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), GpdfError> {
    // Expand inputs and convert CLI to config
    let config = cli.to_config()?;
    config.validate()?;

    // Create output formatter
    let formatter = OutputFormatter::from_config(&config);

    // Print header
    if formatter.should_print() {
        formatter.section(&format!("{} v{}", gpdf::NAME, gpdf::VERSION));
        formatter.blank_line();
    }

    // Build the queue; entries sort by name on insertion
    let mut queue = FileQueue::new();
    queue.add(config.inputs.clone());
    queue.set_filter(config.filter.clone());

    if formatter.should_print() {
        display_queue_view(&formatter, &queue.view());
        formatter.blank_line();
    }

    // Validate configuration and inputs
    formatter.info("Validating input files...");
    let validator = Validator::new();
    let validation_summary = validator.validate_config(&config).await?;

    if formatter.should_print() {
        display_validation_summary(&formatter, &validation_summary);
    }

    if formatter.is_verbose() {
        for result in &validation_summary.results {
            formatter.detail(
                &result.path.display().to_string(),
                &format!(
                    "{} page(s), {} object(s)",
                    result.page_count, result.object_count
                ),
            );
        }
    }

    // Handle output file existence
    if !config.dry_run {
        handle_output_overwrite(&config, &formatter).await?;
    }

    // Dry run mode - stop here
    if config.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", config.output.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    // Perform the merge
    formatter.blank_line();
    formatter.info("Merging documents...");

    let mut progress = if formatter.is_quiet() {
        ProgressBar::disabled()
    } else {
        ProgressBar::new()
    };
    progress.set_message("Merging");

    let mut merger = Merger::from_config(&config);
    let snapshot = queue.snapshot();

    let merge_result = merger
        .merge(&snapshot, |percent| progress.update(percent))
        .await;

    let outcome = match merge_result {
        Ok(outcome) => {
            progress.finish();
            outcome
        }
        Err(err) => {
            // Hide the progress indicator before surfacing the error
            progress.clear();
            return Err(err);
        }
    };

    // Write the output
    formatter.info(&format!("Writing to: {}", config.output.display()));

    let writer = if config.compress {
        PdfWriter::new()
    } else {
        PdfWriter::without_compression()
    };
    let write_stats = writer
        .save_with_stats(&outcome.document, &config.output)
        .await?;

    display_skipped_files(&formatter, &outcome.skipped);

    if formatter.should_print() {
        formatter.blank_line();
        formatter.success(&format!(
            "Successfully created {} ({})",
            config.output.display(),
            write_stats.format_file_size()
        ));

        if formatter.is_verbose() {
            formatter.blank_line();
            formatter.section("Statistics");
            formatter.detail("Files merged", &outcome.statistics.files_merged.to_string());
            formatter.detail(
                "Files skipped",
                &outcome.statistics.files_skipped.to_string(),
            );
            formatter.detail("Total pages", &outcome.statistics.total_pages.to_string());
            formatter.detail("Input size", &outcome.statistics.format_input_size());
            formatter.detail("Output size", &write_stats.format_file_size());
            formatter.detail(
                "Load time",
                &format!("{:.2}s", outcome.statistics.load_time.as_secs_f64()),
            );
            formatter.detail(
                "Merge time",
                &format!("{:.2}s", outcome.statistics.merge_time.as_secs_f64()),
            );
            formatter.detail(
                "Write time",
                &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
            );
            formatter.detail(
                "Compression",
                if write_stats.compressed { "Yes" } else { "No" },
            );
        }
    }

    if config.json {
        let report = MergeReport {
            output: write_stats.output_path.clone(),
            output_size: write_stats.file_size,
            statistics: outcome.statistics.clone(),
            skipped: outcome.skipped.clone(),
        };

        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| GpdfError::other(format!("Failed to serialize summary: {e}")))?;
        println!("{json}");
    }

    // Run reported; driver returns to idle
    merger.reset();

    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), GpdfError> {
    use gpdf::config::OverwriteMode;

    // Check if output exists
    if !config.output.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => {
            // Just overwrite, no questions asked
            Ok(())
        }
        OverwriteMode::NoClobber => {
            // Error if file exists
            Err(GpdfError::output_exists(config.output.clone()))
        }
        OverwriteMode::Prompt => {
            // Ask user for confirmation
            if formatter.is_quiet() {
                // In quiet mode, treat as no-clobber
                return Err(GpdfError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            // Simple yes/no prompt
            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| GpdfError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(GpdfError::Cancelled)
            }
        }
    }
}
