//! Integration tests for the merge operation outside the router.

use axum::body::to_bytes;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use pdfmerge::MergeError;
use pdfmerge::merge::{PdfMerger, UploadedFile, merge_pdfs};
use pdfmerge::server::handlers::merge_uploads;

use crate::common::{dir_entries, marked_pdf, page_markers, spawn_app, write_file};

#[tokio::test]
async fn test_merge_pdfs_writes_output_and_removes_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_file(temp_dir.path(), "a", &marked_pdf("A", 2));
    let b = write_file(temp_dir.path(), "b", &marked_pdf("B", 1));
    let output = temp_dir.path().join("merged.pdf");

    let files = vec![
        UploadedFile::new(Some("a.pdf".into()), &a, 0),
        UploadedFile::new(Some("b.pdf".into()), &b, 0),
    ];
    let written = merge_pdfs(&files, &output).await.unwrap();

    assert_eq!(written, output);
    assert_eq!(
        page_markers(&std::fs::read(&output).unwrap()),
        vec!["A1", "A2", "B1"]
    );
    assert!(!a.exists());
    assert!(!b.exists());
}

#[tokio::test]
async fn test_merger_statistics() {
    let temp_dir = TempDir::new().unwrap();
    let a = marked_pdf("A", 3);
    let b = marked_pdf("B", 4);
    let files = vec![
        UploadedFile::new(
            Some("a.pdf".into()),
            write_file(temp_dir.path(), "a", &a),
            a.len() as u64,
        ),
        UploadedFile::new(
            Some("b.pdf".into()),
            write_file(temp_dir.path(), "b", &b),
            b.len() as u64,
        ),
    ];
    let output = temp_dir.path().join("out.pdf");

    let outcome = PdfMerger::new().merge(&files, &output).await.unwrap();

    assert_eq!(outcome.output_path, output);
    assert_eq!(outcome.statistics.files_merged, 2);
    assert_eq!(outcome.statistics.total_pages, 7);
    assert!(outcome.statistics.output_size > 0);
}

#[tokio::test]
async fn test_merge_pdfs_missing_path() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_file(temp_dir.path(), "a", &marked_pdf("A", 1));
    let files = vec![
        UploadedFile::new(Some("a.pdf".into()), &a, 0),
        UploadedFile::new(Some("ghost.pdf".into()), "", 0),
    ];

    let err = merge_pdfs(&files, &temp_dir.path().join("out.pdf"))
        .await
        .unwrap_err();

    assert!(matches!(err, MergeError::MissingPath { .. }));
    assert_eq!(err.to_string(), "File ghost.pdf is missing a temporary path.");
    assert!(a.exists());
}

#[tokio::test]
async fn test_merge_uploads_reports_missing_path() {
    let app = spawn_app().await;
    let a = write_file(&app.uploads_dir(), "a", &marked_pdf("A", 1));
    let files = vec![
        UploadedFile::new(Some("a.pdf".into()), &a, 0),
        UploadedFile::new(None, "", 0),
    ];

    let err = merge_uploads(&app.state, &files).await.unwrap_err();

    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        err.to_string(),
        "An error occurred during PDF merging: File unknown is missing a temporary path."
    );
    assert!(dir_entries(&app.public_dir()).is_empty());
}

#[tokio::test]
async fn test_merge_uploads_streams_and_cleans_output() {
    let app = spawn_app().await;
    let files = vec![
        UploadedFile::new(
            Some("a.pdf".into()),
            write_file(&app.uploads_dir(), "a", &marked_pdf("A", 1)),
            0,
        ),
        UploadedFile::new(
            Some("b.pdf".into()),
            write_file(&app.uploads_dir(), "b", &marked_pdf("B", 1)),
            0,
        ),
    ];

    let response = merge_uploads(&app.state, &files).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(dir_entries(&app.public_dir()).len(), 1);
    assert!(dir_entries(&app.uploads_dir()).is_empty());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(page_markers(&body), vec!["A1", "B1"]);
    assert!(dir_entries(&app.public_dir()).is_empty());
}
