//! Sequential merging of the queued documents.
//!
//! The driver consumes a queue snapshot in order and stitches every page
//! into one accumulator document, yielding cooperatively as it goes.

pub mod merger;

pub use merger::{MergeOutcome, MergePhase, MergeReport, MergeStatistics, Merger, SkippedFile};
