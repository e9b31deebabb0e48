//! Failure injection for pipeline tests

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::LocalFs;
use crate::domain::entities::FileSnapshot;
use crate::domain::ports::{FsError, FsResult, LiveFileSystem};
use crate::domain::value_objects::PermissionPolicy;

/// `LocalFs` that fails the promotion of one chosen destination, counts
/// how many live writes were attempted and records the policy each
/// created directory and promoted file was given.
#[derive(Debug, Default)]
pub struct FailingFs {
    inner: LocalFs,
    fail_on: Option<PathBuf>,
    fail_restores: bool,
    promotions: AtomicUsize,
    policies: Mutex<Vec<(PathBuf, PermissionPolicy)>>,
}

impl FailingFs {
    pub fn fail_promote_on(dest: impl Into<PathBuf>) -> Self {
        Self {
            fail_on: Some(dest.into()),
            ..Self::default()
        }
    }

    /// Also fail every restore during rollback
    pub fn with_failing_restores(mut self) -> Self {
        self.fail_restores = true;
        self
    }

    pub fn promotions(&self) -> usize {
        self.promotions.load(Ordering::SeqCst)
    }

    /// Policy applied to `path`, if it was created or promoted
    pub fn policy_for(&self, path: &Path) -> Option<PermissionPolicy> {
        self.policies
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, policy)| *policy)
    }

    fn record(&self, path: &Path, policy: &PermissionPolicy) {
        self.policies
            .lock()
            .unwrap()
            .push((path.to_path_buf(), *policy));
    }
}

impl LiveFileSystem for FailingFs {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        self.inner.read(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        self.inner.write(path, content)
    }

    fn create_dir(&self, path: &Path, policy: &PermissionPolicy) -> FsResult<()> {
        self.record(path, policy);
        self.inner.create_dir(path, policy)
    }

    fn snapshot(&self, path: &Path, backup: &Path) -> FsResult<FileSnapshot> {
        self.inner.snapshot(path, backup)
    }

    fn promote(&self, staged: &Path, dest: &Path, policy: &PermissionPolicy) -> FsResult<()> {
        self.promotions.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.as_deref() == Some(dest) {
            return Err(FsError::Other("injected failure: disk full".into()));
        }
        self.record(dest, policy);
        self.inner.promote(staged, dest, policy)
    }

    fn restore(&self, snapshot: &FileSnapshot, dest: &Path) -> FsResult<()> {
        if self.fail_restores {
            return Err(FsError::Other("injected failure: restore".into()));
        }
        self.inner.restore(snapshot, dest)
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        if self.fail_restores {
            return Err(FsError::Other("injected failure: remove".into()));
        }
        self.inner.remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> FsResult<()> {
        self.inner.remove_dir(path)
    }
}
