//! FileSystem ports - abstraction over file I/O operations
//!
//! Two halves: `SourceTree` is the read-only working tree, `LiveFileSystem`
//! is everything that writes (staging area, live target, rollback).

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::FileSnapshot;
use crate::domain::value_objects::PermissionPolicy;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl FsError {
    /// Attach a path to an I/O error, keeping the common kinds distinct
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }
}

/// Read-only view of the source working tree
pub trait SourceTree {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Regular files below `dir`, sorted, skipping ignored and hidden files
    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>>;

    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;
}

/// Writable side: staging area, live target and rollback primitives
pub trait LiveFileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Plain write creating parent directories (staging only)
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Create a single directory with the policy's directory mode and ownership
    fn create_dir(&self, path: &Path, policy: &PermissionPolicy) -> FsResult<()>;

    /// Copy the current state of `path` into `backup`
    fn snapshot(&self, path: &Path, backup: &Path) -> FsResult<FileSnapshot>;

    /// Replace `dest` with the content of `staged` in one rename,
    /// applying mode and ownership before the rename. Ids the policy
    /// leaves open are carried over from the file being replaced.
    fn promote(&self, staged: &Path, dest: &Path, policy: &PermissionPolicy) -> FsResult<()>;

    /// Put a snapshot back at `dest` (content, mode, ownership)
    fn restore(&self, snapshot: &FileSnapshot, dest: &Path) -> FsResult<()>;

    fn remove_file(&self, path: &Path) -> FsResult<()>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> FsResult<()>;
}
