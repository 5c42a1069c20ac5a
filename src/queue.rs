//! File queue state for pending merges.
//!
//! The queue is a pure state machine: mutations (`add`, `remove`, `clear`,
//! `set_filter`) never touch any user interface. Presentation code derives
//! everything it needs from a [`QueueView`] snapshot, so the queue can be
//! exercised in tests without any UI harness.
//!
//! # Examples
//!
//! ```
//! use gpdf::queue::FileQueue;
//! use std::path::PathBuf;
//!
//! let mut queue = FileQueue::new();
//! queue.add([PathBuf::from("b.pdf"), PathBuf::from("a.pdf")]);
//!
//! let view = queue.view();
//! assert_eq!(view.visible[0].name, "a.pdf");
//! assert!(view.merge_enabled);
//! ```

use crate::utils::natural_cmp;
use serde::Serialize;
use std::path::PathBuf;

/// A single queued file.
///
/// The name is the sort/filter/display key; the path is the handle used to
/// read the file's bytes when the merge runs. Duplicate names may coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueEntry {
    /// File name used for sorting, filtering, and display.
    pub name: String,

    /// Path to the file's byte payload.
    pub path: PathBuf,
}

impl QueueEntry {
    /// Create an entry from a path, deriving the display name from the last
    /// path component.
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self { name, path }
    }

    /// Check whether the entry's name matches a filter string
    /// (case-insensitive substring).
    fn matches_filter(&self, filter: &str) -> bool {
        filter.is_empty() || self.name.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Derived presentation state for the queue.
///
/// Never stored; computed fresh from the queue after every mutation.
#[derive(Debug, Clone, Serialize)]
pub struct QueueView {
    /// Entries visible under the current filter, in queue order.
    pub visible: Vec<QueueEntry>,

    /// Total number of queued entries, ignoring the filter.
    pub total: usize,

    /// Whether a merge may start (at least two files queued).
    pub merge_enabled: bool,

    /// Whether the clear-all control applies (queue non-empty).
    pub clear_visible: bool,

    /// Status line describing the queue size.
    pub status: String,
}

/// Ordered collection of files pending merge.
#[derive(Debug, Default)]
pub struct FileQueue {
    /// Queued entries, kept sorted by name on every insertion batch.
    entries: Vec<QueueEntry>,

    /// Active filter text. Affects the derived view only.
    filter: String,
}

impl FileQueue {
    /// Create an empty queue with no active filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append files to the queue, then re-sort the whole queue by name.
    ///
    /// The sort is stable and uses numeric-aware, case-insensitive collation
    /// (see [`natural_cmp`]), so `page2.pdf` lands before `page10.pdf` and
    /// entries with equal names keep their insertion order.
    ///
    /// Returns the view after the mutation.
    pub fn add<I>(&mut self, paths: I) -> QueueView
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.entries
            .extend(paths.into_iter().map(QueueEntry::from_path));
        self.entries.sort_by(|a, b| natural_cmp(&a.name, &b.name));
        self.view()
    }

    /// Remove the entry at `index`.
    ///
    /// Indices refer to the full queue, not the filtered view. Out-of-bounds
    /// indices are a checked no-op returning `None`.
    pub fn remove(&mut self, index: usize) -> Option<QueueEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Empty the queue and reset the filter.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.filter.clear();
    }

    /// Set the filter text.
    ///
    /// Does not mutate the queued entries; only the view's visible subset
    /// changes.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    /// Get the active filter text.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Number of queued entries, ignoring the filter.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All queued entries in order, ignoring the filter.
    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    /// Ordered clone of the full queue handed to the merge driver.
    ///
    /// The merge always consumes the whole queue, not the filtered view.
    pub fn snapshot(&self) -> Vec<QueueEntry> {
        self.entries.clone()
    }

    /// Compute the derived view for the current state.
    pub fn view(&self) -> QueueView {
        let visible: Vec<QueueEntry> = self
            .entries
            .iter()
            .filter(|e| e.matches_filter(&self.filter))
            .cloned()
            .collect();

        let total = self.entries.len();

        QueueView {
            visible,
            total,
            merge_enabled: total >= 2,
            clear_visible: total > 0,
            status: format!("{total} file(s) queued"),
        }
    }
}
