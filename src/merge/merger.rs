//! Core PDF merging implementation.
//!
//! The merge loop is strictly sequential: files are loaded one at a time in
//! queue order, their pages appended to the accumulator document, and the
//! loop suspends at configurable yield points so the rest of the runtime
//! (progress rendering, signals) stays responsive. Nothing here runs two
//! files in parallel; the accumulator is owned by the loop for its whole
//! lifetime.

use lopdf::{Document, Object, ObjectId};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::{Config, FailurePolicy, YieldPolicy};
use crate::error::{GpdfError, Result};
use crate::io::PdfReader;
use crate::queue::QueueEntry;

/// Lifecycle of the merge driver.
///
/// `Running` is only observable from concurrent code; a finished driver
/// reports `Succeeded` or `Failed` until [`Merger::reset`] returns it to
/// `Idle`, ready for the next run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePhase {
    /// No merge in progress.
    #[default]
    Idle,
    /// The merge loop is consuming the queue.
    Running,
    /// The last run produced a merged document.
    Succeeded,
    /// The last run ended with a fatal error.
    Failed,
}

/// A queued file that the skip policy passed over.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    /// Display name of the file.
    pub name: String,

    /// Path of the file.
    pub path: PathBuf,

    /// Why the file was skipped.
    pub reason: String,
}

/// Statistics about a merge operation.
#[derive(Debug, Clone, Serialize)]
pub struct MergeStatistics {
    /// Number of PDFs successfully merged.
    pub files_merged: usize,

    /// Number of PDFs skipped under the skip policy.
    pub files_skipped: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total time taken for the merge loop.
    pub merge_time: Duration,

    /// Time spent reading and parsing inputs.
    pub load_time: Duration,

    /// Total size of the merged input files.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
pub struct MergeOutcome {
    /// The merged PDF document, not yet written anywhere.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged, in output order.
    pub merged_files: Vec<PathBuf>,

    /// Files passed over by the skip policy.
    pub skipped: Vec<SkippedFile>,
}

/// Machine-readable summary of a completed run, for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Path of the written output file.
    pub output: PathBuf,

    /// Size of the written output file in bytes.
    pub output_size: u64,

    /// Merge statistics.
    pub statistics: MergeStatistics,

    /// Files passed over by the skip policy.
    pub skipped: Vec<SkippedFile>,
}

/// PDF merger that combines the queued documents sequentially.
pub struct Merger {
    /// Reader for loading queued files.
    reader: PdfReader,

    /// Per-file failure handling.
    failure_policy: FailurePolicy,

    /// Cooperative yield cadence.
    yield_policy: YieldPolicy,

    /// Current lifecycle phase.
    phase: MergePhase,
}

impl Merger {
    /// Create a new merger with default policies.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
            failure_policy: FailurePolicy::default(),
            yield_policy: YieldPolicy::default(),
            phase: MergePhase::Idle,
        }
    }

    /// Create a merger configured from a [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            reader: PdfReader::new(),
            failure_policy: config.failure_policy,
            yield_policy: config.yield_policy,
            phase: MergePhase::Idle,
        }
    }

    /// Override the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Override the yield policy.
    pub fn with_yield_policy(mut self, policy: YieldPolicy) -> Self {
        self.yield_policy = policy;
        self
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> MergePhase {
        self.phase
    }

    /// Return the driver to `Idle` after a finished run has been reported.
    pub fn reset(&mut self) {
        self.phase = MergePhase::Idle;
    }

    /// Merge a queue snapshot into a single document.
    ///
    /// Files are processed strictly in snapshot order. `on_progress` is
    /// called once per queue entry with the rounded overall percentage,
    /// ending at 100.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two files are in the snapshot
    /// - A file fails under [`FailurePolicy::Abort`]
    /// - Every file was skipped, leaving nothing to merge
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use gpdf::merge::Merger;
    /// # use gpdf::queue::FileQueue;
    /// # async fn example(queue: FileQueue) -> Result<(), Box<dyn std::error::Error>> {
    /// let mut merger = Merger::new();
    /// let outcome = merger.merge(&queue.snapshot(), |percent| {
    ///     println!("{percent}%");
    /// }).await?;
    /// println!("{} pages merged", outcome.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge<F>(&mut self, entries: &[QueueEntry], on_progress: F) -> Result<MergeOutcome>
    where
        F: FnMut(u8),
    {
        self.phase = MergePhase::Running;

        let result = self.run(entries, on_progress).await;

        self.phase = match &result {
            Ok(_) => MergePhase::Succeeded,
            Err(_) => MergePhase::Failed,
        };

        result
    }

    async fn run<F>(&self, entries: &[QueueEntry], mut on_progress: F) -> Result<MergeOutcome>
    where
        F: FnMut(u8),
    {
        if entries.len() < 2 {
            return Err(GpdfError::NotEnoughFiles {
                count: entries.len(),
            });
        }

        let merge_start = Instant::now();
        let total = entries.len();
        let yield_every = self.yield_policy.every.max(1);

        let mut accumulator: Option<Document> = None;
        let mut max_id = 0;
        let mut merged_files = Vec::new();
        let mut skipped = Vec::new();
        let mut load_time = Duration::ZERO;
        let mut input_size = 0;

        on_progress(0);

        for (i, entry) in entries.iter().enumerate() {
            match self.reader.load(&entry.path).await {
                Ok(loaded) => {
                    load_time += loaded.load_time;
                    input_size += loaded.file_size;

                    if let Some(merged) = accumulator.as_mut() {
                        max_id = append_document(merged, loaded.document, max_id)?;
                    } else {
                        // First successful file becomes the base document.
                        let document = loaded.document;
                        max_id = document.max_id;
                        accumulator = Some(document);
                    }

                    merged_files.push(entry.path.clone());
                }
                Err(e) => match self.failure_policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::SkipAndReport => {
                        if !e.is_recoverable() {
                            return Err(e);
                        }
                        skipped.push(SkippedFile {
                            name: entry.name.clone(),
                            path: entry.path.clone(),
                            reason: e.to_string(),
                        });
                    }
                },
            }

            on_progress(progress_percent(i + 1, total));

            // Yield point: let the scheduler breathe before the next file.
            if i % yield_every == 0 {
                tokio::time::sleep(self.yield_policy.pause).await;
            } else {
                tokio::task::yield_now().await;
            }
        }

        let mut merged = accumulator.ok_or(GpdfError::NoFilesToMerge)?;

        // Renumber for a consistent final object table.
        merged.renumber_objects();

        let statistics = MergeStatistics {
            files_merged: merged_files.len(),
            files_skipped: skipped.len(),
            total_pages: merged.get_pages().len(),
            merge_time: merge_start.elapsed(),
            load_time,
            input_size,
        };

        Ok(MergeOutcome {
            document: merged,
            statistics,
            merged_files,
            skipped,
        })
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

/// Append every page of `doc` to `merged`, in source order.
///
/// Returns the new maximum object id of the combined document.
fn append_document(merged: &mut Document, mut doc: Document, max_id: u32) -> Result<u32> {
    // Renumber objects to avoid ID conflicts
    doc.renumber_objects_with(max_id + 1);
    let new_max_id = doc.max_id;

    // Page references, in page order
    let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

    // Add all objects from doc to merged
    merged.objects.extend(doc.objects);

    add_pages_to_tree(merged, &doc_pages)?;

    Ok(new_max_id)
}

/// Add pages to the merged document's page tree.
fn add_pages_to_tree(merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let catalog = merged
        .catalog_mut()
        .map_err(|e| GpdfError::merge_failed(format!("Failed to get catalog: {e}")))?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| GpdfError::merge_failed(format!("Failed to get pages reference: {e}")))?;

    let pages_dict = merged
        .get_object_mut(pages_id)
        .map_err(|e| GpdfError::merge_failed(format!("Failed to get pages object: {e}")))?;

    if let Object::Dictionary(dict) = pages_dict {
        let kids = dict
            .get_mut(b"Kids")
            .map_err(|_| GpdfError::merge_failed("Pages dictionary missing Kids array"))?;

        if let Object::Array(kids_array) = kids {
            for &page_id in page_ids {
                kids_array.push(Object::Reference(page_id));
            }
        } else {
            return Err(GpdfError::merge_failed("Kids is not an array"));
        }

        // Update page count
        let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);

        let new_count = current_count + page_ids.len() as i64;
        dict.set("Count", Object::Integer(new_count));
    } else {
        return Err(GpdfError::merge_failed(
            "Pages object is not a dictionary",
        ));
    }

    Ok(())
}

/// Overall progress after finishing `done` of `total` entries.
fn progress_percent(done: usize, total: usize) -> u8 {
    (done as f64 / total as f64 * 100.0).round() as u8
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
