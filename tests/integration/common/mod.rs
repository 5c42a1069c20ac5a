//! Shared helpers for integration tests.
//!
//! Fixtures are built programmatically with `lopdf` so the suite never
//! depends on binary files being checked in. Each generated page carries a
//! distinctive MediaBox width, letting tests assert page provenance and
//! order after a merge.

use lopdf::{Document, dictionary};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Build an in-memory PDF with `page_widths.len()` pages, one per width.
pub fn build_pdf(page_widths: &[i64]) -> Document {
    let mut doc = Document::with_version("1.4");

    let pages_id = doc.new_object_id();

    let mut kids: Vec<lopdf::Object> = Vec::new();
    for &width in page_widths {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_widths.len() as i64,
        }
        .into(),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a PDF with the given page widths into `dir` under `name`.
pub fn write_pdf(dir: &Path, name: &str, page_widths: &[i64]) -> PathBuf {
    let path = dir.join(name);
    let mut bytes = Vec::new();
    build_pdf(page_widths).save_to(&mut bytes).unwrap();
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Write a file that is not a PDF at all.
pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"this is not a pdf").unwrap();
    path
}

/// Read back the MediaBox width of a 1-indexed page in a document.
pub fn page_width(doc: &Document, page_number: u32) -> i64 {
    let pages = doc.get_pages();
    let page_id = pages[&page_number];
    let lopdf::Object::Dictionary(dict) = doc.get_object(page_id).unwrap() else {
        panic!("page {page_number} is not a dictionary");
    };
    let lopdf::Object::Array(mediabox) = dict.get(b"MediaBox").unwrap() else {
        panic!("page {page_number} has no MediaBox");
    };
    mediabox[2].as_i64().unwrap()
}

/// Widths of all pages in page order.
pub fn page_widths(doc: &Document) -> Vec<i64> {
    let count = doc.get_pages().len() as u32;
    (1..=count).map(|n| page_width(doc, n)).collect()
}
