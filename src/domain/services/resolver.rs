//! Manifest resolution service
//!
//! Turns the fixed manifest plus an optional change-set into the
//! `DeploymentUnit` for one run.

use std::path::Path;

use crate::domain::entities::{ConfigEntry, DeploymentUnit, FileEntry, FileKind, Manifest};
use crate::domain::ports::SourceTree;
use crate::domain::value_objects::ChangeSet;
use crate::error::DeployError;

/// Outcome of resolving a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Unit(DeploymentUnit),
    /// Nothing in the manifest is affected; a normal terminal outcome
    NothingToDeploy,
}

pub struct ManifestResolver<'a, S: SourceTree> {
    tree: &'a S,
}

impl<'a, S: SourceTree> ManifestResolver<'a, S> {
    pub fn new(tree: &'a S) -> Self {
        Self { tree }
    }

    /// Resolve the unit for one run.
    ///
    /// Without a change-set every manifest path is included. With one, only
    /// entries the change-set touches are included and the config entry is
    /// included iff its source changed. Required paths that would be
    /// included but do not exist fail the run with `MissingSource`, all of
    /// them listed.
    pub fn resolve(
        &self,
        source_root: &Path,
        target_root: &Path,
        manifest: &Manifest,
        changes: Option<&ChangeSet>,
    ) -> Result<Resolution, DeployError> {
        let relevant = |path: &Path| changes.map_or(true, |c| c.touches(path));

        let mut missing = Vec::new();
        let mut files = Vec::new();

        for spec in &manifest.assets {
            if !relevant(&spec.path) {
                continue;
            }

            let source = source_root.join(&spec.path);
            if !self.tree.exists(&source) {
                if spec.required {
                    missing.push(source);
                }
                continue;
            }

            if !self.tree.is_dir(&source) {
                files.push(FileEntry::asset(source_root, target_root, &spec.path));
                continue;
            }

            let listed = self
                .tree
                .list_files(&source)
                .map_err(|e| DeployError::StructureInvalid {
                    problems: vec![(source.clone(), e.to_string())],
                })?;
            for file in listed {
                let inner = file.strip_prefix(&source).unwrap_or(&file);
                let relative = spec.path.join(inner);
                if relevant(&relative) {
                    files.push(FileEntry::asset(source_root, target_root, relative));
                }
            }
        }

        let config = match &manifest.config {
            Some(spec) if relevant(&spec.source) => {
                let source = source_root.join(&spec.source);
                if self.tree.exists(&source) {
                    Some(ConfigEntry {
                        entry: FileEntry {
                            source,
                            dest: spec.dest.clone(),
                            relative: spec.source.clone(),
                            kind: FileKind::Config,
                        },
                        service: spec.service.clone(),
                        requires_reload: spec.requires_reload,
                    })
                } else {
                    missing.push(source);
                    None
                }
            }
            _ => None,
        };

        if !missing.is_empty() {
            return Err(DeployError::MissingSource { paths: missing });
        }

        let unit =
            DeploymentUnit::new(files, config).map_err(|dest| DeployError::StructureInvalid {
                problems: vec![(dest, "two manifest entries share this destination".into())],
            })?;

        if unit.is_empty() {
            Ok(Resolution::NothingToDeploy)
        } else {
            Ok(Resolution::Unit(unit))
        }
    }
}
