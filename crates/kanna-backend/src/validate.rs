//! Pre-transfer source validation
//!
//! Shared by every concrete backend: a transfer source is checked against the
//! local filesystem before any backend-specific primitive runs, so no backend
//! can silently attempt to ship a missing or wrong-kind path. Only path
//! metadata is read, never file contents.

use crate::{BackendError, Result};
use std::fs;
use std::path::Path;

/// Validate that `source` exists and is a regular file.
///
/// Existence is checked strictly before kind, so a missing path always
/// reports "doesn't exist" rather than a kind mismatch.
pub fn source_file(source: &Path) -> Result<()> {
    let metadata = match fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(_) => {
            return Err(BackendError::SourceNotExist(format!(
                "The file '{}' doesn't exist.",
                source.display()
            )))
        }
    };

    if !metadata.is_file() {
        return Err(BackendError::SourceNotExist(format!(
            "'{}' is not a file.",
            source.display()
        )));
    }

    Ok(())
}

/// Validate that `source` exists and is a directory.
pub fn source_directory(source: &Path) -> Result<()> {
    let metadata = match fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(_) => {
            return Err(BackendError::SourceNotExist(format!(
                "The directory '{}' doesn't exist.",
                source.display()
            )))
        }
    };

    if !metadata.is_dir() {
        return Err(BackendError::SourceNotExist(format!(
            "'{}' is not a directory.",
            source.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn error_message(result: Result<()>) -> String {
        match result {
            Err(BackendError::SourceNotExist(message)) => message,
            other => panic!("expected SourceNotExist, got {:?}", other),
        }
    }

    #[test]
    fn test_file_missing_source() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");

        let message = error_message(source_file(&src));
        assert_eq!(message, format!("The file '{}' doesn't exist.", src.display()));
    }

    #[test]
    fn test_file_source_is_a_directory() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir(&src).unwrap();

        let message = error_message(source_file(&src));
        assert_eq!(message, format!("'{}' is not a file.", src.display()));
    }

    #[test]
    fn test_file_regular_source_passes() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::write(&src, b"content").unwrap();

        assert!(source_file(&src).is_ok());
    }

    #[test]
    fn test_directory_missing_source() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");

        let message = error_message(source_directory(&src));
        assert_eq!(
            message,
            format!("The directory '{}' doesn't exist.", src.display())
        );
    }

    #[test]
    fn test_directory_source_is_a_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::write(&src, b"content").unwrap();

        let message = error_message(source_directory(&src));
        assert_eq!(message, format!("'{}' is not a directory.", src.display()));
    }

    #[test]
    fn test_directory_source_passes() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir(&src).unwrap();

        assert!(source_directory(&src).is_ok());
    }

    #[test]
    fn test_missing_path_never_reports_kind_mismatch() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("absent");

        assert!(error_message(source_file(&src)).contains("doesn't exist"));
        assert!(error_message(source_directory(&src)).contains("doesn't exist"));
    }
}
