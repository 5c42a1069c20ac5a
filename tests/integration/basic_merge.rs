//! Integration tests for the full queue-merge-write flow.

use gpdf::io::PdfWriter;
use gpdf::merge::{MergePhase, Merger};
use gpdf::queue::FileQueue;
use lopdf::Document;
use tempfile::TempDir;

use crate::common::{page_widths, write_pdf};

#[tokio::test]
async fn test_queue_merge_write_roundtrip() {
    let dir = TempDir::new().unwrap();

    // Deliberately queued out of name order
    let b = write_pdf(dir.path(), "b.pdf", &[222]);
    let a = write_pdf(dir.path(), "a.pdf", &[111]);

    let mut queue = FileQueue::new();
    queue.add([b, a]);

    let mut merger = Merger::new();
    let outcome = merger.merge(&queue.snapshot(), |_| {}).await.unwrap();

    // Queue sorting means a.pdf contributes the first page
    assert_eq!(page_widths(&outcome.document), vec![111, 222]);
    assert_eq!(merger.phase(), MergePhase::Succeeded);

    let output = dir.path().join("merged.pdf");
    let writer = PdfWriter::new();
    writer.save(&outcome.document, &output).await.unwrap();

    // The written file parses back with both pages intact
    let reloaded = Document::load(&output).unwrap();
    assert_eq!(reloaded.get_pages().len(), 2);
}

#[tokio::test]
async fn test_merge_preserves_numeric_name_order() {
    let dir = TempDir::new().unwrap();

    let p10 = write_pdf(dir.path(), "page10.pdf", &[1010]);
    let p2 = write_pdf(dir.path(), "page2.pdf", &[22]);
    let p1 = write_pdf(dir.path(), "page1.pdf", &[11]);

    let mut queue = FileQueue::new();
    queue.add([p10, p2, p1]);

    let mut merger = Merger::new();
    let outcome = merger.merge(&queue.snapshot(), |_| {}).await.unwrap();

    assert_eq!(page_widths(&outcome.document), vec![11, 22, 1010]);
}

#[tokio::test]
async fn test_merge_multi_page_documents() {
    let dir = TempDir::new().unwrap();

    let first = write_pdf(dir.path(), "first.pdf", &[1, 2, 3]);
    let second = write_pdf(dir.path(), "second.pdf", &[4, 5]);

    let mut queue = FileQueue::new();
    queue.add([first, second]);

    let mut merger = Merger::new();
    let outcome = merger.merge(&queue.snapshot(), |_| {}).await.unwrap();

    // Pages of each source stay in source order
    assert_eq!(page_widths(&outcome.document), vec![1, 2, 3, 4, 5]);
    assert_eq!(outcome.statistics.total_pages, 5);
    assert_eq!(outcome.statistics.files_merged, 2);
}

#[tokio::test]
async fn test_merge_reports_progress_to_completion() {
    let dir = TempDir::new().unwrap();

    let a = write_pdf(dir.path(), "a.pdf", &[1]);
    let b = write_pdf(dir.path(), "b.pdf", &[2]);
    let c = write_pdf(dir.path(), "c.pdf", &[3]);
    let d = write_pdf(dir.path(), "d.pdf", &[4]);

    let mut queue = FileQueue::new();
    queue.add([a, b, c, d]);

    let mut percents = Vec::new();
    let mut merger = Merger::new();
    merger
        .merge(&queue.snapshot(), |p| percents.push(p))
        .await
        .unwrap();

    assert_eq!(percents, vec![0, 25, 50, 75, 100]);
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_merge_filter_does_not_shrink_merge_input() {
    let dir = TempDir::new().unwrap();

    let a = write_pdf(dir.path(), "a.pdf", &[111]);
    let b = write_pdf(dir.path(), "b.pdf", &[222]);

    let mut queue = FileQueue::new();
    queue.add([a, b]);
    queue.set_filter("a");

    // The filter narrows the view, never the merge
    assert_eq!(queue.view().visible.len(), 1);

    let mut merger = Merger::new();
    let outcome = merger.merge(&queue.snapshot(), |_| {}).await.unwrap();

    assert_eq!(outcome.statistics.total_pages, 2);
}

#[tokio::test]
async fn test_written_output_is_compressible() {
    let dir = TempDir::new().unwrap();

    let a = write_pdf(dir.path(), "a.pdf", &[111]);
    let b = write_pdf(dir.path(), "b.pdf", &[222]);

    let mut queue = FileQueue::new();
    queue.add([a, b]);

    let mut merger = Merger::new();
    let outcome = merger.merge(&queue.snapshot(), |_| {}).await.unwrap();

    let compressed_path = dir.path().join("compressed.pdf");
    let plain_path = dir.path().join("plain.pdf");

    PdfWriter::new()
        .save(&outcome.document, &compressed_path)
        .await
        .unwrap();
    PdfWriter::without_compression()
        .save(&outcome.document, &plain_path)
        .await
        .unwrap();

    // Both variants must parse back to the same page count
    assert_eq!(Document::load(&compressed_path).unwrap().get_pages().len(), 2);
    assert_eq!(Document::load(&plain_path).unwrap().get_pages().len(), 2);
}
