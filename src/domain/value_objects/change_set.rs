//! Change-set value object
//!
//! The paths touched by a commit, relative to the source root.

use std::path::{Component, Path, PathBuf};

/// Set of changed paths, normalized relative to the source root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    paths: Vec<PathBuf>,
}

impl ChangeSet {
    /// Build a change-set from raw paths.
    ///
    /// Absolute paths under `source_root` are made relative; `./` and
    /// trailing separators are dropped. Absolute paths outside the source
    /// root cannot match any entry and are discarded.
    pub fn from_paths<I, P>(paths: I, source_root: &Path) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut normalized: Vec<PathBuf> = paths
            .into_iter()
            .filter_map(|p| normalize(p.as_ref(), source_root))
            .collect();
        normalized.sort();
        normalized.dedup();
        Self { paths: normalized }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether a manifest path is affected by this change-set.
    ///
    /// Matches component-wise in both directions: a changed file inside a
    /// manifest directory, or a changed directory containing a manifest file.
    pub fn touches(&self, manifest_path: &Path) -> bool {
        self.paths
            .iter()
            .any(|changed| changed.starts_with(manifest_path) || manifest_path.starts_with(changed))
    }
}

fn normalize(path: &Path, source_root: &Path) -> Option<PathBuf> {
    let relative = if path.is_absolute() {
        path.strip_prefix(source_root).ok()?
    } else {
        path
    };

    let cleaned: PathBuf = relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if cleaned.as_os_str().is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
