//! Utilities for input path collection and name collation.

use crate::error::{GpdfError, Result};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand CLI inputs into concrete PDF file paths.
///
/// Each input may be:
/// - a path to a regular file (used as-is),
/// - a directory (walked recursively, keeping only `.pdf` files),
/// - a glob pattern such as `"chapter*.pdf"` or `"docs/**/*.pdf"`.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Returns a flattened list of resolved paths, in input order. Ordering of
/// the final queue is the queue's concern, not this function's.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from glob and directory iterators.
pub fn collect_input_paths<T>(inputs: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for input in inputs.into_iter() {
        let input = input.as_ref();
        let path = Path::new(input);

        if path.is_dir() {
            resolved_paths.extend(collect_pdfs_in_directory(path)?);
        } else if path.is_file() {
            resolved_paths.push(path.to_path_buf());
        } else {
            resolved_paths.extend(collect_paths_for_pattern(input)?);
        }
    }

    Ok(resolved_paths)
}

/// Recursively collect `.pdf` files under a directory.
///
/// This is the file-picker/drop analog for folders: everything that is not a
/// PDF is filtered out, the way the original drop path filters on MIME type.
fn collect_pdfs_in_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut resolved_paths = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|err| GpdfError::Other {
            message: err.to_string(),
        })?;

        if entry.file_type().is_file() && has_pdf_extension(entry.path()) {
            resolved_paths.push(entry.into_path());
        }
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern).map_err(|err| GpdfError::Other {
        message: err.to_string(),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| GpdfError::Other {
            message: err.to_string(),
        })?;
        if path.is_file() {
            resolved_paths.push(path);
        }
    }

    Ok(resolved_paths)
}

/// Check whether a path has a `.pdf` extension (case-insensitive).
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Compare two file names using numeric-aware, case-insensitive collation.
///
/// Runs of ASCII digits are compared by numeric value, everything else by
/// lowercased character. This makes `page2.pdf` sort before `page10.pdf`,
/// which plain lexicographic ordering gets wrong.
///
/// The ordering is total: equal numeric values with different zero-padding
/// ("7" vs "007") are disambiguated by run length so that sorting stays
/// deterministic.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();

    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let run_a = take_digit_run(&mut ca);
                let run_b = take_digit_run(&mut cb);

                let trimmed_a = run_a.trim_start_matches('0');
                let trimmed_b = run_b.trim_start_matches('0');

                let ord = trimmed_a
                    .len()
                    .cmp(&trimmed_b.len())
                    .then_with(|| trimmed_a.cmp(trimmed_b))
                    .then_with(|| run_a.len().cmp(&run_b.len()));

                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let lx = x.to_lowercase().next().unwrap_or(x);
                let ly = y.to_lowercase().next().unwrap_or(y);

                if lx != ly {
                    return lx.cmp(&ly);
                }

                ca.next();
                cb.next();
            }
        }
    }
}

/// Consume a run of ASCII digits from the iterator.
fn take_digit_run(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}
