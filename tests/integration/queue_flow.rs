//! Integration tests driving the queue the way an interactive session does:
//! add, filter, remove, clear, with the derived view checked at each step.

use gpdf::queue::FileQueue;
use std::path::PathBuf;

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

#[test]
fn test_session_add_filter_remove_clear() {
    let mut queue = FileQueue::new();

    // Two batches arrive, the queue stays sorted across both
    queue.add(paths(&["scan_10.pdf", "scan_2.pdf"]));
    let view = queue.add(paths(&["scan_1.pdf", "notes.pdf"]));

    let names: Vec<&str> = view.visible.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["notes.pdf", "scan_1.pdf", "scan_2.pdf", "scan_10.pdf"]
    );
    assert_eq!(view.status, "4 file(s) queued");
    assert!(view.merge_enabled);
    assert!(view.clear_visible);

    // Typing a filter narrows the view without touching the queue
    queue.set_filter("SCAN");
    let view = queue.view();
    assert_eq!(view.visible.len(), 3);
    assert_eq!(view.total, 4);

    // Removing by full-queue index drops exactly that entry
    let removed = queue.remove(0).unwrap();
    assert_eq!(removed.name, "notes.pdf");
    assert_eq!(queue.len(), 3);

    // Out-of-bounds removal changes nothing
    assert!(queue.remove(99).is_none());
    assert_eq!(queue.len(), 3);

    // Clearing resets both the queue and the filter
    queue.clear();
    let view = queue.view();
    assert_eq!(view.total, 0);
    assert!(!view.merge_enabled);
    assert!(!view.clear_visible);
    assert_eq!(queue.filter(), "");
}

#[test]
fn test_add_n_then_m_files_sorted() {
    let mut queue = FileQueue::new();

    let first: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("d{i}.pdf"))).collect();
    let second: Vec<PathBuf> = (0..3).map(|i| PathBuf::from(format!("c{i}.pdf"))).collect();

    queue.add(first);
    queue.add(second);

    assert_eq!(queue.len(), 8);

    let names: Vec<String> = queue.entries().iter().map(|e| e.name.clone()).collect();
    let mut sorted = names.clone();
    sorted.sort_by(|a, b| gpdf::utils::natural_cmp(a, b));
    assert_eq!(names, sorted);
}

#[test]
fn test_filter_preserves_queue_order_among_matches() {
    let mut queue = FileQueue::new();
    queue.add(paths(&["b_report.pdf", "a_report.pdf", "zzz.pdf", "c_report.pdf"]));
    queue.set_filter("report");

    let view = queue.view();
    let names: Vec<&str> = view
        .visible
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["a_report.pdf", "b_report.pdf", "c_report.pdf"]);
}

#[test]
fn test_view_serializes_for_machine_consumers() {
    let mut queue = FileQueue::new();
    queue.add(paths(&["a.pdf", "b.pdf"]));

    let json = serde_json::to_value(queue.view()).unwrap();

    assert_eq!(json["total"], 2);
    assert_eq!(json["merge_enabled"], true);
    assert_eq!(json["status"], "2 file(s) queued");
    assert_eq!(json["visible"][0]["name"], "a.pdf");
}
