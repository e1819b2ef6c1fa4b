// Local filesystem adapter - Input discovery and file placement

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Local filesystem adapter
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self)
    }

    /// Video files directly inside `dir`, sorted by name
    fn scan_directory(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, DomainError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                DomainError::InputNotFound(format!("Failed to read {}: {}", dir.display(), e))
            })?;
            if entry.file_type().is_file() && PathUtils::has_extension(entry.path(), extensions) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Create the destination's parent directory if absent
    fn ensure_parent(destination: &Path) -> Result<(), DomainError> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                info!("Creating directory {}", parent.display());
                fs::create_dir_all(parent).map_err(|e| {
                    DomainError::FilesystemOperationFailure(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        Ok(())
    }

    fn move_file(source: &Path, destination: &Path) -> Result<(), DomainError> {
        let rename_err = match fs::rename(source, destination) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == ErrorKind::CrossesDevices => e,
            Err(e) => {
                return Err(DomainError::FilesystemOperationFailure(format!(
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    e
                )))
            }
        };

        // Rename cannot cross filesystems; fall back to copy + delete
        debug!("Rename failed ({}), falling back to copy", rename_err);
        if let Err(copy_err) = fs::copy(source, destination) {
            let _ = fs::remove_file(destination);
            return Err(DomainError::FilesystemOperationFailure(format!(
                "Failed to move {} to {}: {} (copy fallback: {})",
                source.display(),
                destination.display(),
                rename_err,
                copy_err
            )));
        }

        fs::remove_file(source).map_err(|e| {
            DomainError::FilesystemOperationFailure(format!(
                "Copied to {} but failed to remove {}: {}",
                destination.display(),
                source.display(),
                e
            ))
        })
    }

    fn symlink(source: &Path, destination: &Path) -> Result<(), DomainError> {
        let target = source.canonicalize().map_err(|e| {
            DomainError::FilesystemOperationFailure(format!(
                "Failed to resolve {}: {}",
                source.display(),
                e
            ))
        })?;

        #[cfg(unix)]
        let result = std::os::unix::fs::symlink(&target, destination);
        #[cfg(windows)]
        let result = std::os::windows::fs::symlink_file(&target, destination);

        result.map_err(|e| {
            DomainError::FilesystemOperationFailure(format!(
                "Failed to symlink {} to {}: {}",
                destination.display(),
                target.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn find_video_file(
        &self,
        input: &Path,
        extensions: &[String],
    ) -> Result<PathBuf, DomainError> {
        let metadata = fs::metadata(input).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                DomainError::InputNotFound(format!("{} does not exist", input.display()))
            }
            _ => DomainError::InputNotFound(format!("Cannot access {}: {}", input.display(), e)),
        })?;

        if metadata.is_file() {
            if !PathUtils::has_extension(input, extensions) {
                return Err(DomainError::InputNotFound(format!(
                    "{} is not a video file ({})",
                    input.display(),
                    extensions.join(", ")
                )));
            }
            return Ok(input.to_path_buf());
        }

        let mut files = Self::scan_directory(input, extensions)?;
        match files.len() {
            0 => Err(DomainError::InputNotFound(format!(
                "No video file ({}) in {}",
                extensions.join(", "),
                input.display()
            ))),
            1 => Ok(files.remove(0)),
            _ => Err(DomainError::MultipleCandidateFiles {
                dir: input.display().to_string(),
                files: files
                    .iter()
                    .filter_map(|f| f.file_name())
                    .map(|name| name.to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    async fn place_file(
        &self,
        source: &Path,
        destination: &Path,
        mode: PlacementMode,
    ) -> Result<(), DomainError> {
        if mode == PlacementMode::Test {
            return Ok(());
        }

        if fs::symlink_metadata(destination).is_ok() {
            return Err(DomainError::FilesystemOperationFailure(format!(
                "Destination already exists: {}",
                destination.display()
            )));
        }

        Self::ensure_parent(destination)?;

        let io_failure = |verb: &str, e: std::io::Error| {
            DomainError::FilesystemOperationFailure(format!(
                "Failed to {} {} to {}: {}",
                verb,
                source.display(),
                destination.display(),
                e
            ))
        };

        match mode {
            PlacementMode::Test => Ok(()),
            PlacementMode::Rename => fs::rename(source, destination).map_err(|e| io_failure("rename", e)),
            PlacementMode::Copy => fs::copy(source, destination)
                .map(|_| ())
                .map_err(|e| io_failure("copy", e)),
            PlacementMode::Move => Self::move_file(source, destination),
            PlacementMode::HardLink => {
                fs::hard_link(source, destination).map_err(|e| io_failure("hard link", e))
            }
            PlacementMode::SoftLink => Self::symlink(source, destination),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn extensions() -> Vec<String> {
        vec!["mkv".to_string(), "mp4".to_string(), "avi".to_string()]
    }

    fn touch(path: &Path, contents: &[u8]) {
        fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn test_find_single_video_in_directory() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("Dune (2021).MKV"), b"video");
        touch(&temp_dir.path().join("Dune (2021).nfo"), b"nfo");
        touch(&temp_dir.path().join("poster.jpg"), b"jpg");

        let adapter = LocalFsAdapter::new().unwrap();
        let found = adapter.find_video_file(temp_dir.path(), &extensions()).await.unwrap();

        assert_eq!(found, temp_dir.path().join("Dune (2021).MKV"));
    }

    #[tokio::test]
    async fn test_find_ignores_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("extras")).unwrap();
        touch(&temp_dir.path().join("extras").join("trailer.mp4"), b"video");
        touch(&temp_dir.path().join("movie.mp4"), b"video");

        let adapter = LocalFsAdapter::new().unwrap();
        let found = adapter.find_video_file(temp_dir.path(), &extensions()).await.unwrap();

        assert_eq!(found, temp_dir.path().join("movie.mp4"));
    }

    #[tokio::test]
    async fn test_find_rejects_multiple_videos() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("a.mkv"), b"video");
        touch(&temp_dir.path().join("b.avi"), b"video");

        let adapter = LocalFsAdapter::new().unwrap();
        let err = adapter.find_video_file(temp_dir.path(), &extensions()).await.unwrap_err();

        match err {
            DomainError::MultipleCandidateFiles { files, .. } => assert_eq!(files, "a.mkv, b.avi"),
            other => panic!("expected MultipleCandidateFiles, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_reports_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = LocalFsAdapter::new().unwrap();

        let missing = adapter
            .find_video_file(&temp_dir.path().join("nope"), &extensions())
            .await;
        assert!(matches!(missing, Err(DomainError::InputNotFound(_))));

        let empty = adapter.find_video_file(temp_dir.path(), &extensions()).await;
        assert!(matches!(empty, Err(DomainError::InputNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_accepts_file_input() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("movie.mkv");
        touch(&file, b"video");

        let adapter = LocalFsAdapter::new().unwrap();
        assert_eq!(adapter.find_video_file(&file, &extensions()).await.unwrap(), file);
    }

    #[tokio::test]
    async fn test_find_rejects_file_with_other_extension() {
        let temp_dir = TempDir::new().unwrap();
        let notes = temp_dir.path().join("notes.txt");
        touch(&notes, b"text");

        let adapter = LocalFsAdapter::new().unwrap();
        let err = adapter.find_video_file(&notes, &extensions()).await.unwrap_err();

        match err {
            DomainError::InputNotFound(message) => assert!(message.contains("notes.txt")),
            other => panic!("expected InputNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_move_of_missing_source_fails_cleanly() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("gone.mkv");
        let destination = temp_dir.path().join("out").join("moved.mkv");

        let adapter = LocalFsAdapter::new().unwrap();
        let err = adapter
            .place_file(&source, &destination, PlacementMode::Move)
            .await
            .unwrap_err();

        match err {
            DomainError::FilesystemOperationFailure(message) => {
                assert!(!message.contains("copy fallback"))
            }
            other => panic!("expected FilesystemOperationFailure, got {:?}", other),
        }
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_copy_creates_destination_directory() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("in.mkv");
        touch(&source, b"video");
        let destination = temp_dir.path().join("out").join("Dune (2021)").join("Dune.mkv");

        let adapter = LocalFsAdapter::new().unwrap();
        adapter.place_file(&source, &destination, PlacementMode::Copy).await.unwrap();

        assert_eq!(fs::read(&destination).unwrap(), b"video");
        assert!(source.exists());
    }

    #[tokio::test]
    async fn test_move_and_rename_remove_source() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = LocalFsAdapter::new().unwrap();

        for mode in [PlacementMode::Move, PlacementMode::Rename] {
            let source = temp_dir.path().join(format!("{}.mkv", mode));
            touch(&source, b"video");
            let destination = temp_dir.path().join(format!("{}-done.mkv", mode));

            adapter.place_file(&source, &destination, mode).await.unwrap();

            assert!(!source.exists());
            assert_eq!(fs::read(&destination).unwrap(), b"video");
        }
    }

    #[tokio::test]
    async fn test_hard_link_shares_content() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("in.mkv");
        touch(&source, b"video");
        let destination = temp_dir.path().join("linked.mkv");

        let adapter = LocalFsAdapter::new().unwrap();
        adapter.place_file(&source, &destination, PlacementMode::HardLink).await.unwrap();

        assert!(source.exists());
        assert_eq!(fs::read(&destination).unwrap(), b"video");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_soft_link_points_at_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("in.mkv");
        touch(&source, b"video");
        let destination = temp_dir.path().join("library").join("linked.mkv");

        let adapter = LocalFsAdapter::new().unwrap();
        adapter.place_file(&source, &destination, PlacementMode::SoftLink).await.unwrap();

        let target = fs::read_link(&destination).unwrap();
        assert_eq!(target, source.canonicalize().unwrap());
    }

    #[tokio::test]
    async fn test_existing_destination_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("in.mkv");
        let destination = temp_dir.path().join("out.mkv");
        touch(&source, b"new");
        touch(&destination, b"old");

        let adapter = LocalFsAdapter::new().unwrap();
        let err = adapter
            .place_file(&source, &destination, PlacementMode::Copy)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::FilesystemOperationFailure(_)));
        assert_eq!(fs::read(&destination).unwrap(), b"old");
    }

    #[tokio::test]
    async fn test_test_mode_touches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("in.mkv");
        touch(&source, b"video");
        let destination = temp_dir.path().join("sub").join("out.mkv");

        let adapter = LocalFsAdapter::new().unwrap();
        adapter.place_file(&source, &destination, PlacementMode::Test).await.unwrap();

        assert!(!destination.exists());
        assert!(!temp_dir.path().join("sub").exists());
    }
}
