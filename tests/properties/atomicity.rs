//! Property tests for commit atomicity: a commit that fails part-way
//! leaves the live tree exactly as it was before the run.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::TempDir;

use stagehand::application::{DeployOptions, DeployUseCase};
use stagehand::domain::entities::{AssetSpec, FileSnapshot, Manifest};
use stagehand::domain::ports::{CheckOutcome, FsError, FsResult, LiveFileSystem, ServiceControl};
use stagehand::domain::value_objects::{DeploymentStatus, PermissionPolicy};
use stagehand::error::DeployError;
use stagehand::infrastructure::{LocalFs, LocalSourceTree};

/// Local file system whose promote fails for one destination file name
struct FailOn {
    inner: LocalFs,
    name: String,
}

impl LiveFileSystem for FailOn {
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
        self.inner.create_dir(path, policy)
    }

    fn snapshot(&self, path: &Path, backup: &Path) -> FsResult<FileSnapshot> {
        self.inner.snapshot(path, backup)
    }

    fn promote(&self, staged: &Path, dest: &Path, policy: &PermissionPolicy) -> FsResult<()> {
        if dest.file_name() == Some(OsStr::new(&self.name)) {
            return Err(FsError::Other("injected failure".to_string()));
        }
        self.inner.promote(staged, dest, policy)
    }

    fn restore(&self, snapshot: &FileSnapshot, dest: &Path) -> FsResult<()> {
        self.inner.restore(snapshot, dest)
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        self.inner.remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> FsResult<()> {
        self.inner.remove_dir(path)
    }
}

struct NoService;

impl ServiceControl for NoService {
    fn name(&self) -> &str {
        "none"
    }

    fn check_config(&self, _config: &Path) -> CheckOutcome {
        CheckOutcome::passed("")
    }

    fn reload(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Every file and directory below `root`, with file contents
fn tree(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    let mut out = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).unwrap().flatten() {
            let path = entry.path();
            let rel = path.strip_prefix(root).unwrap().to_path_buf();
            if path.is_dir() {
                out.insert(rel, None);
                pending.push(path);
            } else {
                out.insert(rel, Some(std::fs::read(&path).unwrap()));
            }
        }
    }
    out
}

fn write(path: &Path, content: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// (relative path, new content, existing live content)
type Site = Vec<(String, Vec<u8>, Option<Vec<u8>>)>;

fn site() -> impl Strategy<Value = Site> {
    let file = (
        proptest::sample::select(vec!["a", "b", "c", "d", "e", "f"]),
        proptest::sample::select(vec!["", "css/", "js/", "img/icons/"]),
        proptest::collection::vec(any::<u8>(), 0..64),
        proptest::option::of(proptest::collection::vec(any::<u8>(), 0..64)),
    );
    proptest::collection::vec(file, 1..8).prop_map(|files| {
        let mut seen = std::collections::BTreeSet::new();
        files
            .into_iter()
            .filter_map(|(name, dir, new, old)| {
                let rel = format!("site/{dir}{name}.dat");
                seen.insert(rel.clone()).then_some((rel, new, old))
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: whichever file fails to promote, the live tree ends up
    /// byte-identical to its state before the run, directories included.
    #[test]
    fn property_failed_commit_restores_live_tree(files in site(), pick in any::<prop::sample::Index>()) {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let state = TempDir::new().unwrap();

        for (rel, new, old) in &files {
            write(&source.path().join(rel), new);
            if let Some(old) = old {
                write(&target.path().join(rel), old);
            }
        }
        let before = tree(target.path());

        let failing = &files[pick.index(files.len())].0;
        let name = Path::new(failing).file_name().unwrap().to_string_lossy().to_string();

        let manifest = Manifest {
            assets: vec![AssetSpec::required("site")],
            config: None,
        };
        let options = DeployOptions::new(source.path(), target.path(), manifest)
            .with_lock_dir(state.path())
            .with_staging_dir(state.path())
            .with_force(true);

        let use_case = DeployUseCase::new(
            LocalSourceTree::new(),
            FailOn { inner: LocalFs::new(), name },
            NoService,
        );
        let result = use_case.execute(&options);

        prop_assert_eq!(result.status, DeploymentStatus::Failed);
        let unrestored = match &result.error {
            Some(DeployError::CommitFailed { unrestored, .. }) => unrestored.len(),
            other => return Err(TestCaseError::fail(format!("expected CommitFailed, got {other:?}"))),
        };
        prop_assert_eq!(unrestored, 0);
        prop_assert_eq!(tree(target.path()), before);
    }
}
