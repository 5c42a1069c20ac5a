//! Integration tests for preflight validation, the layer behind --dry-run.

use gpdf::config::{Config, FailurePolicy, OverwriteMode};
use gpdf::error::GpdfError;
use gpdf::validation::Validator;
use tempfile::TempDir;

use crate::common::{write_garbage, write_pdf};

#[tokio::test]
async fn test_validate_config_happy_path() {
    let dir = TempDir::new().unwrap();

    let a = write_pdf(dir.path(), "a.pdf", &[111, 112]);
    let b = write_pdf(dir.path(), "b.pdf", &[221]);

    let config = Config {
        inputs: vec![a, b],
        output: dir.path().join("merged.pdf"),
        ..Default::default()
    };

    let validator = Validator::new();
    let summary = validator.validate_config(&config).await.unwrap();

    assert_eq!(summary.files_validated, 2);
    assert_eq!(summary.total_pages, 3);
    assert_eq!(summary.files_failed, 0);
}

#[tokio::test]
async fn test_validate_config_counts_unreadable_files() {
    let dir = TempDir::new().unwrap();

    let a = write_pdf(dir.path(), "a.pdf", &[111]);
    let bad = write_garbage(dir.path(), "bad.pdf");

    let config = Config {
        inputs: vec![a, bad],
        output: dir.path().join("merged.pdf"),
        failure_policy: FailurePolicy::SkipAndReport,
        ..Default::default()
    };

    let validator = Validator::new();
    let summary = validator.validate_config(&config).await.unwrap();

    assert_eq!(summary.files_validated, 1);
    assert_eq!(summary.files_failed, 1);
}

#[tokio::test]
async fn test_validate_config_abort_policy_propagates() {
    let dir = TempDir::new().unwrap();

    let a = write_pdf(dir.path(), "a.pdf", &[111]);
    let bad = write_garbage(dir.path(), "bad.pdf");

    let config = Config {
        inputs: vec![a, bad],
        output: dir.path().join("merged.pdf"),
        failure_policy: FailurePolicy::Abort,
        ..Default::default()
    };

    let validator = Validator::new();
    assert!(validator.validate_config(&config).await.is_err());
}

#[tokio::test]
async fn test_validate_config_no_clobber_output() {
    let dir = TempDir::new().unwrap();

    let a = write_pdf(dir.path(), "a.pdf", &[111]);
    let b = write_pdf(dir.path(), "b.pdf", &[222]);
    let output = write_pdf(dir.path(), "existing.pdf", &[1]);

    let config = Config {
        inputs: vec![a, b],
        output,
        overwrite_mode: OverwriteMode::NoClobber,
        ..Default::default()
    };

    let validator = Validator::new();
    let result = validator.validate_config(&config).await;

    assert!(matches!(result, Err(GpdfError::OutputExists { .. })));
}

#[test]
fn test_config_validation_is_the_merge_gate() {
    let config = Config {
        inputs: vec![std::path::PathBuf::from("one.pdf")],
        ..Default::default()
    };

    // Fewer than two queued files never reaches the merge driver
    assert!(config.validate().is_err());
}
