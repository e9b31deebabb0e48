//! Deploy Options
//!
//! Configuration types for deploy operations.

use std::path::PathBuf;

use crate::domain::entities::Manifest;
use crate::domain::value_objects::{ChangeSet, PermissionPolicy};

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Working tree the manifest is resolved against
    pub source_root: PathBuf,
    /// Live web root assets are promoted into
    pub target_root: PathBuf,
    pub manifest: Manifest,
    /// Restrict the unit to what changed (post-commit runs)
    pub changes: Option<ChangeSet>,
    /// Applied to assets and the directories created for them
    pub policy: PermissionPolicy,
    /// Applied to the service config and the directories created for it
    pub config_policy: PermissionPolicy,
    /// Directory holding the per-target lock file
    pub lock_dir: PathBuf,
    /// Parent of the staging area and commit backups
    pub staging_dir: PathBuf,
    /// Resolve, validate, stage and plan; never commit
    pub dry_run: bool,
    /// Skip the confirmation prompt
    pub force: bool,
    /// Leave the service config out of the unit entirely
    pub skip_service: bool,
}

impl DeployOptions {
    pub fn new(
        source_root: impl Into<PathBuf>,
        target_root: impl Into<PathBuf>,
        manifest: Manifest,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            target_root: target_root.into(),
            manifest,
            changes: None,
            policy: PermissionPolicy::default(),
            config_policy: PermissionPolicy::default(),
            lock_dir: std::env::temp_dir(),
            staging_dir: std::env::temp_dir(),
            dry_run: false,
            force: false,
            skip_service: false,
        }
    }

    pub fn with_changes(mut self, changes: ChangeSet) -> Self {
        self.changes = Some(changes);
        self
    }

    pub fn with_policy(mut self, policy: PermissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_config_policy(mut self, policy: PermissionPolicy) -> Self {
        self.config_policy = policy;
        self
    }

    pub fn with_lock_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lock_dir = dir.into();
        self
    }

    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_skip_service(mut self, skip: bool) -> Self {
        self.skip_service = skip;
        self
    }

    /// The manifest this run resolves, minus the config when skipped
    pub fn effective_manifest(&self) -> Manifest {
        if self.skip_service {
            self.manifest.clone().without_config()
        } else {
            self.manifest.clone()
        }
    }
}
