//! Deployment lock
//!
//! One advisory lock file per target root, held for the whole run. The
//! file lives outside the target so it is never deployed or rolled back.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::value_objects::ContentHash;
use crate::error::DeployError;

use super::fs::normalize_path;

/// Exclusive hold on a target root; released on drop
#[derive(Debug)]
pub struct DeployLock {
    file: File,
    path: PathBuf,
}

impl DeployLock {
    /// Lock file path for `target_root` inside `lock_dir`.
    ///
    /// Keyed on the normalized root, so spellings of the same directory
    /// share one lock.
    pub fn path_for(lock_dir: &Path, target_root: &Path) -> PathBuf {
        let cwd = std::env::current_dir().unwrap_or_default();
        let root = normalize_path(&cwd, target_root);
        let hash = ContentHash::from_bytes(root.as_os_str().as_encoded_bytes());
        lock_dir.join(format!("stagehand-{}.lock", &hash.hex()[..16]))
    }

    /// Take the lock without waiting
    pub fn acquire(lock_dir: &Path, target_root: &Path) -> Result<Self, DeployError> {
        fs::create_dir_all(lock_dir)?;
        let path = Self::path_for(lock_dir, target_root);
        let file = File::create(&path)?;

        file.try_lock_exclusive()
            .map_err(|_| DeployError::DeploymentInProgress {
                target_root: target_root.to_path_buf(),
                lock_path: path.clone(),
            })?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DeployLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn second_acquire_is_deployment_in_progress() {
        let dir = tempdir().unwrap();
        let target = Path::new("/srv/www/admin");

        let held = DeployLock::acquire(dir.path(), target).unwrap();
        let err = DeployLock::acquire(dir.path(), target).unwrap_err();

        match err {
            DeployError::DeploymentInProgress { lock_path, .. } => {
                assert_eq!(lock_path, held.path())
            }
            other => panic!("expected DeploymentInProgress, got {other:?}"),
        }
    }

    #[test]
    fn lock_is_released_on_drop() {
        let dir = tempdir().unwrap();
        let target = Path::new("/srv/www/admin");

        drop(DeployLock::acquire(dir.path(), target).unwrap());
        assert!(DeployLock::acquire(dir.path(), target).is_ok());
    }

    #[test]
    fn different_targets_do_not_contend() {
        let dir = tempdir().unwrap();
        let _a = DeployLock::acquire(dir.path(), Path::new("/srv/a")).unwrap();
        assert!(DeployLock::acquire(dir.path(), Path::new("/srv/b")).is_ok());
    }

    #[test]
    fn trailing_slash_and_dot_components_share_the_lock() {
        let dir = tempdir().unwrap();
        let _held = DeployLock::acquire(dir.path(), Path::new("/srv/www")).unwrap();

        for spelling in ["/srv/www/", "/srv/./www", "/srv/other/../www"] {
            let err = DeployLock::acquire(dir.path(), Path::new(spelling)).unwrap_err();
            assert!(
                matches!(err, DeployError::DeploymentInProgress { .. }),
                "{spelling} got its own lock"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_target_shares_the_lock() {
        let locks = tempdir().unwrap();
        let roots = tempdir().unwrap();
        let real = roots.path().join("www");
        let alias = roots.path().join("current");
        fs::create_dir(&real).unwrap();
        std::os::unix::fs::symlink(&real, &alias).unwrap();

        let _held = DeployLock::acquire(locks.path(), &real).unwrap();
        let err = DeployLock::acquire(locks.path(), &alias).unwrap_err();

        assert!(matches!(err, DeployError::DeploymentInProgress { .. }));
    }

    #[test]
    fn lock_path_is_stable_per_target() {
        let dir = Path::new("/run/lock");
        let a = DeployLock::path_for(dir, Path::new("/srv/www"));
        assert_eq!(a, DeployLock::path_for(dir, Path::new("/srv/www")));
        assert_ne!(a, DeployLock::path_for(dir, Path::new("/srv/other")));
        assert!(a.file_name().unwrap().to_string_lossy().starts_with("stagehand-"));
    }
}
