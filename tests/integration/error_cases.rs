//! Integration tests for error handling and the failure policies.

use gpdf::config::FailurePolicy;
use gpdf::error::GpdfError;
use gpdf::io::PdfWriter;
use gpdf::merge::{MergePhase, Merger};
use gpdf::queue::FileQueue;
use lopdf::Document;
use tempfile::TempDir;

use crate::common::{page_widths, write_garbage, write_pdf};

#[tokio::test]
async fn test_skip_policy_merges_remaining_files() {
    let dir = TempDir::new().unwrap();

    let a = write_pdf(dir.path(), "a.pdf", &[111]);
    let bad = write_garbage(dir.path(), "broken.pdf");
    let c = write_pdf(dir.path(), "c.pdf", &[333]);

    let mut queue = FileQueue::new();
    queue.add([a, bad, c]);

    let mut merger = Merger::new();
    let outcome = merger.merge(&queue.snapshot(), |_| {}).await.unwrap();

    // Output holds pages only from the two valid files
    assert_eq!(page_widths(&outcome.document), vec![111, 333]);

    // The corrupt file is reported as skipped
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].name, "broken.pdf");
    assert!(!outcome.skipped[0].reason.is_empty());

    // And the written output reflects the same
    let output = dir.path().join("merged.pdf");
    PdfWriter::new()
        .save(&outcome.document, &output)
        .await
        .unwrap();
    assert_eq!(Document::load(&output).unwrap().get_pages().len(), 2);
}

#[tokio::test]
async fn test_abort_policy_produces_no_output() {
    let dir = TempDir::new().unwrap();

    let a = write_pdf(dir.path(), "a.pdf", &[111]);
    let bad = write_garbage(dir.path(), "broken.pdf");

    let mut queue = FileQueue::new();
    queue.add([a, bad]);

    let mut merger = Merger::new().with_failure_policy(FailurePolicy::Abort);
    let result = merger.merge(&queue.snapshot(), |_| {}).await;

    assert!(result.is_err());
    assert_eq!(merger.phase(), MergePhase::Failed);

    // Partial output is discarded: nothing was ever written
    assert!(!dir.path().join("GPDF_Unificado.pdf").exists());
}

#[tokio::test]
async fn test_single_file_queue_is_rejected() {
    let dir = TempDir::new().unwrap();
    let only = write_pdf(dir.path(), "only.pdf", &[111]);

    let mut queue = FileQueue::new();
    queue.add([only]);
    assert!(!queue.view().merge_enabled);

    let mut merger = Merger::new();
    let result = merger.merge(&queue.snapshot(), |_| {}).await;

    assert!(matches!(result, Err(GpdfError::NotEnoughFiles { count: 1 })));
}

#[tokio::test]
async fn test_queue_of_only_unreadable_files_is_fatal() {
    let dir = TempDir::new().unwrap();

    let bad1 = write_garbage(dir.path(), "one.pdf");
    let bad2 = write_garbage(dir.path(), "two.pdf");

    let mut queue = FileQueue::new();
    queue.add([bad1, bad2]);

    let mut merger = Merger::new();
    let result = merger.merge(&queue.snapshot(), |_| {}).await;

    assert!(matches!(result, Err(GpdfError::NoFilesToMerge)));
}

#[tokio::test]
async fn test_missing_file_is_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();

    let a = write_pdf(dir.path(), "a.pdf", &[111]);
    let gone = dir.path().join("deleted-meanwhile.pdf");
    let c = write_pdf(dir.path(), "c.pdf", &[333]);

    let mut queue = FileQueue::new();
    queue.add([a, gone, c]);

    let mut merger = Merger::new();
    let outcome = merger.merge(&queue.snapshot(), |_| {}).await.unwrap();

    assert_eq!(outcome.statistics.files_merged, 2);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].name, "deleted-meanwhile.pdf");
}

#[tokio::test]
async fn test_failed_write_leaves_no_partial_file() {
    let dir = TempDir::new().unwrap();

    let a = write_pdf(dir.path(), "a.pdf", &[111]);
    let b = write_pdf(dir.path(), "b.pdf", &[222]);

    let mut queue = FileQueue::new();
    queue.add([a, b]);

    let mut merger = Merger::new();
    let outcome = merger.merge(&queue.snapshot(), |_| {}).await.unwrap();

    let output = dir.path().join("missing-dir/out.pdf");
    let result = PdfWriter::new().save(&outcome.document, &output).await;

    assert!(matches!(result, Err(GpdfError::FailedToCreateOutput { .. })));
    assert!(!output.exists());
}
