//! Deployment planning service
//!
//! Classifies every staged file against the live target so the operator
//! can see what a commit would do before confirming it.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::FileKind;
use crate::domain::ports::LiveFileSystem;
use crate::domain::value_objects::ContentHash;

use super::stager::StagingArea;

/// The action a commit takes for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    /// Destination does not exist yet
    Create,
    /// Destination exists with different content
    Update,
    /// Destination already holds the staged content (rewritten anyway)
    Unchanged,
}

impl std::fmt::Display for FileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileAction::Create => write!(f, "create"),
            FileAction::Update => write!(f, "update"),
            FileAction::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// A planned write for a single file
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedFile {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub kind: FileKind,
    pub action: FileAction,
    pub hash: ContentHash,
}

/// Before/after text of the service config, when it changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChange {
    pub dest: PathBuf,
    pub old: String,
    pub new: String,
}

/// Result of planning a commit
#[derive(Debug, Clone, Default)]
pub struct DeploymentPlan {
    pub files: Vec<PlannedFile>,
    pub config_change: Option<ConfigChange>,
}

impl DeploymentPlan {
    pub fn count(&self, action: FileAction) -> usize {
        self.files.iter().filter(|f| f.action == action).count()
    }

    /// True when every destination already matches
    pub fn is_noop(&self) -> bool {
        self.files.iter().all(|f| f.action == FileAction::Unchanged)
    }
}

pub struct Planner<'a, FS: LiveFileSystem> {
    fs: &'a FS,
}

impl<'a, FS: LiveFileSystem> Planner<'a, FS> {
    pub fn new(fs: &'a FS) -> Self {
        Self { fs }
    }

    pub fn plan(&self, staging: &StagingArea) -> DeploymentPlan {
        let mut plan = DeploymentPlan::default();

        for staged in staging.files() {
            let dest = &staged.entry.dest;
            let present = self.fs.exists(dest);
            let existing = if present { self.fs.read(dest).ok() } else { None };

            let action = match &existing {
                None if !present => FileAction::Create,
                Some(bytes) if ContentHash::from_bytes(bytes) == staged.hash => {
                    FileAction::Unchanged
                }
                _ => FileAction::Update,
            };

            if staged.entry.kind == FileKind::Config && action == FileAction::Update {
                plan.config_change = existing
                    .as_deref()
                    .zip(self.fs.read(&staged.staged).ok().as_deref())
                    .and_then(|(old, new)| {
                        Some(ConfigChange {
                            dest: dest.clone(),
                            old: String::from_utf8(old.to_vec()).ok()?,
                            new: String::from_utf8(new.to_vec()).ok()?,
                        })
                    });
            }

            plan.files.push(PlannedFile {
                source: staged.entry.source.clone(),
                dest: dest.clone(),
                kind: staged.entry.kind,
                action,
                hash: staged.hash.clone(),
            });
        }

        plan
    }
}
