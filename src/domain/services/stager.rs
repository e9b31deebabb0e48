//! Staging service
//!
//! Copies every entry of a unit into a private, uniquely named directory
//! and verifies each copy. The live target is never touched here. On any
//! failure the whole staging area is discarded.

use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;

use crate::domain::entities::{DeploymentUnit, FileEntry, FileKind};
use crate::domain::ports::{LiveFileSystem, SourceTree};
use crate::domain::value_objects::ContentHash;
use crate::error::DeployError;

/// One verified copy inside the staging area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub entry: FileEntry,
    pub staged: PathBuf,
    pub hash: ContentHash,
}

/// Staged copies of a whole unit, in manifest order.
///
/// Owns its directory; dropping the area removes it.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
    files: Vec<StagedFile>,
}

impl StagingArea {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn config_file(&self) -> Option<&StagedFile> {
        self.files.iter().find(|f| f.entry.kind == FileKind::Config)
    }

    /// Remove the staging directory now, reporting any cleanup error
    pub fn discard(self) -> std::io::Result<()> {
        self.dir.close()
    }
}

pub struct Stager<'a, S: SourceTree, FS: LiveFileSystem> {
    tree: &'a S,
    fs: &'a FS,
}

impl<'a, S: SourceTree, FS: LiveFileSystem> Stager<'a, S, FS> {
    pub fn new(tree: &'a S, fs: &'a FS) -> Self {
        Self { tree, fs }
    }

    /// Stage `unit` into a fresh directory under `parent`
    pub fn stage(&self, unit: &DeploymentUnit, parent: &Path) -> Result<StagingArea, DeployError> {
        let dir = tempfile::Builder::new()
            .prefix("stagehand-stage-")
            .tempdir_in(parent)
            .map_err(|e| DeployError::StageFailed {
                path: parent.to_path_buf(),
                reason: format!("cannot create staging directory: {e}"),
            })?;

        match self.stage_into(dir.path(), unit) {
            Ok(files) => Ok(StagingArea { dir, files }),
            Err(err) => {
                let _ = dir.close();
                Err(err)
            }
        }
    }

    fn stage_into(&self, root: &Path, unit: &DeploymentUnit) -> Result<Vec<StagedFile>, DeployError> {
        let mut staged_files = Vec::with_capacity(unit.len());

        for entry in unit.entries() {
            let fail = |reason: String| DeployError::StageFailed {
                path: entry.source.clone(),
                reason,
            };

            let content = self.tree.read(&entry.source).map_err(|e| fail(e.to_string()))?;
            let hash = ContentHash::from_bytes(&content);

            let staged = root.join(mirror_path(&entry.dest));
            self.fs
                .write(&staged, &content)
                .map_err(|e| fail(e.to_string()))?;

            let copied = self.fs.read(&staged).map_err(|e| fail(e.to_string()))?;
            let copied = ContentHash::from_bytes(&copied);
            if copied != hash {
                return Err(fail(format!(
                    "staged copy {} does not match source {}",
                    copied.short(),
                    hash.short()
                )));
            }

            staged_files.push(StagedFile {
                entry: entry.clone(),
                staged,
                hash,
            });
        }

        Ok(staged_files)
    }
}

/// Destination path re-rooted so it can live inside the staging directory
fn mirror_path(dest: &Path) -> PathBuf {
    dest.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}
