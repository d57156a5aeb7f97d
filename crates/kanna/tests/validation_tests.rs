//! Pre-transfer validation behavior through a boxed backend, the way the
//! surrounding tool drives it.

use kanna::{create, Backend, BackendError, BackendKind, Options};
use std::path::Path;
use tempfile::TempDir;

fn source_not_exist_message(result: kanna::Result<()>) -> String {
    match result {
        Err(BackendError::SourceNotExist(message)) => message,
        other => panic!("expected SourceNotExist, got {:?}", other),
    }
}

#[tokio::test]
async fn send_file_reports_missing_source() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    let mut backend = create(BackendKind::Local, Options::new());

    let message = source_not_exist_message(backend.send_file(&src, Path::new("dst")).await);

    assert_eq!(message, format!("The file '{}' doesn't exist.", src.display()));
}

#[tokio::test]
async fn send_file_reports_directory_source() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    std::fs::create_dir(&src).unwrap();
    let mut backend = create(BackendKind::Local, Options::new());

    let message = source_not_exist_message(backend.send_file(&src, Path::new("dst")).await);

    assert_eq!(message, format!("'{}' is not a file.", src.display()));
}

#[tokio::test]
async fn send_file_accepts_regular_source() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    std::fs::write(&src, b"content").unwrap();
    let mut backend = create(BackendKind::Local, Options::new());

    backend.send_file(&src, &dst).await.unwrap();

    assert_eq!(std::fs::read(&dst).unwrap(), b"content");
}

#[tokio::test]
async fn send_directory_reports_missing_source() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    let mut backend = create(BackendKind::Local, Options::new());

    let message = source_not_exist_message(backend.send_directory(&src, Path::new("dst")).await);

    assert_eq!(
        message,
        format!("The directory '{}' doesn't exist.", src.display())
    );
}

#[tokio::test]
async fn send_directory_reports_file_source() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    std::fs::write(&src, b"content").unwrap();
    let mut backend = create(BackendKind::Local, Options::new());

    let message = source_not_exist_message(backend.send_directory(&src, Path::new("dst")).await);

    assert_eq!(message, format!("'{}' is not a directory.", src.display()));
}

#[tokio::test]
async fn send_directory_accepts_directory_source() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    std::fs::create_dir(&src).unwrap();
    std::fs::write(src.join("file.txt"), b"content").unwrap();
    let mut backend = create(BackendKind::Local, Options::new());

    backend.send_directory(&src, &dst).await.unwrap();

    assert_eq!(std::fs::read(dst.join("file.txt")).unwrap(), b"content");
}

#[tokio::test]
async fn missing_source_is_never_a_kind_mismatch() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("absent");
    let mut backend = create(BackendKind::Local, Options::new());

    let file_message = source_not_exist_message(backend.send_file(&src, Path::new("dst")).await);
    let dir_message =
        source_not_exist_message(backend.send_directory(&src, Path::new("dst")).await);

    assert!(file_message.contains("doesn't exist"));
    assert!(dir_message.contains("doesn't exist"));
}
