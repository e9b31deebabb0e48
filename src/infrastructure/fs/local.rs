//! Local File System Implementation
//!
//! Implements the file system ports for local disk operations. Every live
//! write goes through a temporary file in the destination directory and a
//! single rename, so a reader sees either the old or the new content.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::entities::FileSnapshot;
use crate::domain::ports::{FsError, FsResult, LiveFileSystem, SourceTree};
use crate::domain::value_objects::{Ownership, PermissionPolicy};

/// Per-directory ignore file honored next to `.gitignore`
pub const DEPLOY_IGNORE_FILE: &str = ".deployignore";

/// Read-only working tree on local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSourceTree;

impl LocalSourceTree {
    pub fn new() -> Self {
        Self
    }
}

impl SourceTree for LocalSourceTree {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        let walker = WalkBuilder::new(dir)
            .hidden(true)
            .git_ignore(true)
            .require_git(false)
            .add_custom_ignore_filename(DEPLOY_IGNORE_FILE)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| FsError::Other(e.to_string()))?;
            if entry.file_type().is_some_and(|t| t.is_file()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        fs::read(path).map_err(|e| FsError::io(path, e))
    }
}

/// Local file system implementation
///
/// Provides atomic promotion, snapshots and standard file operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }

    /// Write `content` next to `dest` and rename it into place.
    ///
    /// Ids `owner` leaves open are copied from the file being replaced.
    fn replace(&self, dest: &Path, content: &[u8], mode: u32, owner: Ownership) -> FsResult<()> {
        let owner = inherit_ownership(dest, owner);
        let parent = dest
            .parent()
            .ok_or_else(|| FsError::Other(format!("{} has no parent", dest.display())))?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".stagehand-")
            .tempfile_in(parent)
            .map_err(|e| FsError::io(parent, e))?;
        tmp.write_all(content).map_err(|e| FsError::io(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| FsError::io(tmp.path(), e))?;
        set_mode(tmp.path(), mode)?;
        apply_ownership(tmp.path(), owner)?;

        tmp.persist(dest).map_err(|e| FsError::io(dest, e.error))?;
        Ok(())
    }
}

impl LiveFileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        fs::read(path).map_err(|e| FsError::io(path, e))
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| FsError::io(parent, e))?;
        }
        fs::write(path, content).map_err(|e| FsError::io(path, e))
    }

    fn create_dir(&self, path: &Path, policy: &PermissionPolicy) -> FsResult<()> {
        fs::create_dir(path).map_err(|e| FsError::io(path, e))?;
        set_mode(path, policy.modes.dir)?;
        apply_ownership(path, policy.ownership)
    }

    fn snapshot(&self, path: &Path, backup: &Path) -> FsResult<FileSnapshot> {
        let meta = fs::metadata(path).map_err(|e| FsError::io(path, e))?;
        if !meta.is_file() {
            return Err(FsError::Other(format!(
                "{} exists and is not a regular file",
                path.display()
            )));
        }
        fs::copy(path, backup).map_err(|e| FsError::io(path, e))?;

        let (mode, uid, gid) = owner_and_mode(&meta);
        Ok(FileSnapshot {
            backup: backup.to_path_buf(),
            mode,
            uid,
            gid,
        })
    }

    fn promote(&self, staged: &Path, dest: &Path, policy: &PermissionPolicy) -> FsResult<()> {
        let content = fs::read(staged).map_err(|e| FsError::io(staged, e))?;
        self.replace(dest, &content, policy.modes.file, policy.ownership)
    }

    fn restore(&self, snapshot: &FileSnapshot, dest: &Path) -> FsResult<()> {
        let content = fs::read(&snapshot.backup).map_err(|e| FsError::io(&snapshot.backup, e))?;
        let owner = Ownership {
            uid: snapshot.uid,
            gid: snapshot.gid,
        };
        self.replace(dest, &content, snapshot.mode.unwrap_or(0o644), owner)
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        fs::remove_file(path).map_err(|e| FsError::io(path, e))
    }

    fn remove_dir(&self, path: &Path) -> FsResult<()> {
        fs::remove_dir(path).map_err(|e| FsError::io(path, e))
    }
}

#[cfg(unix)]
fn owner_and_mode(meta: &fs::Metadata) -> (Option<u32>, Option<u32>, Option<u32>) {
    use std::os::unix::fs::MetadataExt;
    (Some(meta.mode() & 0o7777), Some(meta.uid()), Some(meta.gid()))
}

#[cfg(not(unix))]
fn owner_and_mode(_meta: &fs::Metadata) -> (Option<u32>, Option<u32>, Option<u32>) {
    (None, None, None)
}

/// Fill the ids `owner` leaves open from whatever is at `dest` now
fn inherit_ownership(dest: &Path, owner: Ownership) -> Ownership {
    match fs::metadata(dest) {
        Ok(meta) => {
            let (_, uid, gid) = owner_and_mode(&meta);
            Ownership {
                uid: owner.uid.or(uid),
                gid: owner.gid.or(gid),
            }
        }
        Err(_) => owner,
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> FsResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| FsError::io(path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> FsResult<()> {
    Ok(())
}

/// Change owner and group, skipping the syscall when nothing would change
#[cfg(unix)]
fn apply_ownership(path: &Path, owner: Ownership) -> FsResult<()> {
    use std::os::unix::fs::MetadataExt;

    if owner.is_noop() {
        return Ok(());
    }
    let meta = fs::metadata(path).map_err(|e| FsError::io(path, e))?;
    let uid = owner.uid.filter(|uid| *uid != meta.uid());
    let gid = owner.gid.filter(|gid| *gid != meta.gid());
    if uid.is_none() && gid.is_none() {
        return Ok(());
    }
    std::os::unix::fs::chown(path, uid, gid).map_err(|e| FsError::io(path, e))
}

#[cfg(not(unix))]
fn apply_ownership(_path: &Path, _owner: Ownership) -> FsResult<()> {
    Ok(())
}
