//! Commit service
//!
//! Promotes a staging area into the live target one file at a time.
//! Every destructive step is journalled before it happens; on the first
//! failure the journal is replayed in reverse so the live target ends up
//! byte-identical to where it started.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::domain::entities::{FileKind, JournalAction, JournalEntry, RollbackJournal};
use crate::domain::ports::{DeployEvent, DeployEventSink, FsError, LiveFileSystem, NoopEventSink};
use crate::domain::value_objects::PermissionPolicy;
use crate::error::DeployError;

use super::stager::{StagedFile, StagingArea};

/// A successful commit.
///
/// Keeps the journal and its backups alive until the reloader is done
/// with them; dropping the receipt discards both.
#[derive(Debug)]
pub struct CommitReceipt {
    pub journal: RollbackJournal,
    pub files_written: usize,
    _backups: TempDir,
}

/// Outcome of replaying a journal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollbackReport {
    /// File writes undone
    pub restored: usize,
    /// Paths that could not be put back
    pub unrestored: Vec<PathBuf>,
}

pub struct Committer<'a, FS: LiveFileSystem> {
    fs: &'a FS,
    policy: PermissionPolicy,
    config_policy: PermissionPolicy,
    events: &'a dyn DeployEventSink,
}

impl<'a, FS: LiveFileSystem> Committer<'a, FS> {
    /// `policy` applies to every entry until a config policy is given
    pub fn new(fs: &'a FS, policy: PermissionPolicy) -> Self {
        Self {
            fs,
            policy,
            config_policy: policy,
            events: &NoopEventSink,
        }
    }

    /// Mode and ownership for the service config entry
    pub fn with_config_policy(mut self, policy: PermissionPolicy) -> Self {
        self.config_policy = policy;
        self
    }

    pub fn with_events(mut self, events: &'a dyn DeployEventSink) -> Self {
        self.events = events;
        self
    }

    /// Promote every staged file, rolling back on the first failure.
    ///
    /// Backups of overwritten files go to a private directory under
    /// `backup_parent`.
    pub fn commit(
        &self,
        staging: &StagingArea,
        backup_parent: &Path,
    ) -> Result<CommitReceipt, DeployError> {
        let backups = tempfile::Builder::new()
            .prefix("stagehand-backup-")
            .tempdir_in(backup_parent)
            .map_err(|e| DeployError::CommitFailed {
                path: backup_parent.to_path_buf(),
                reason: format!("cannot create backup directory: {e}"),
                files_written: 0,
                restored: 0,
                unrestored: Vec::new(),
            })?;

        let mut journal = RollbackJournal::new();

        for (index, staged) in staging.files().iter().enumerate() {
            if let Err(err) = self.apply(index, staged, backups.path(), &mut journal) {
                let files_written = journal.files_written();
                let report = self.rollback(journal);
                return Err(DeployError::CommitFailed {
                    path: staged.entry.dest.clone(),
                    reason: err.to_string(),
                    files_written,
                    restored: report.restored,
                    unrestored: report.unrestored,
                });
            }

            if self.events.wants_detailed_events() {
                self.events.on_event(DeployEvent::FileCommitted {
                    index,
                    path: staged.entry.dest.clone(),
                });
            }
        }

        let files_written = journal.files_written();
        Ok(CommitReceipt {
            journal,
            files_written,
            _backups: backups,
        })
    }

    /// Replay `journal` newest-first. Keeps going past individual failures.
    pub fn rollback(&self, journal: RollbackJournal) -> RollbackReport {
        let mut report = RollbackReport::default();

        for entry in journal.into_reverse() {
            self.undo(entry, &mut report);
        }

        self.events.on_event(DeployEvent::RolledBack {
            restored: report.restored,
            unrestored: report.unrestored.len(),
        });
        report
    }

    /// Undo only the write to `dest` and the directories created for it
    /// alone, leaving the rest of the journal in place.
    ///
    /// Returns false when there was nothing to undo or the undo failed.
    pub fn rollback_file(&self, journal: &mut RollbackJournal, dest: &Path) -> bool {
        let Some(entry) = journal.take_file(dest) else {
            return false;
        };
        let mut report = RollbackReport::default();
        self.undo(entry, &mut report);
        for dir in journal.take_dirs_only_for(dest) {
            self.undo(dir, &mut report);
        }
        report.unrestored.is_empty() && report.restored == 1
    }

    fn apply(
        &self,
        index: usize,
        staged: &StagedFile,
        backups: &Path,
        journal: &mut RollbackJournal,
    ) -> Result<(), FsError> {
        let dest = &staged.entry.dest;
        let policy = match staged.entry.kind {
            FileKind::Asset => &self.policy,
            FileKind::Config => &self.config_policy,
        };
        self.create_parents(dest, policy, journal)?;

        let previous = if self.fs.exists(dest) {
            let backup = backups.join(index.to_string());
            Some(self.fs.snapshot(dest, &backup)?)
        } else {
            None
        };

        journal.record_file(dest, previous);
        self.fs.promote(&staged.staged, dest, policy)?;
        journal.mark_applied();
        Ok(())
    }

    /// Create missing ancestors of `dest` top-down, journalling each one
    fn create_parents(
        &self,
        dest: &Path,
        policy: &PermissionPolicy,
        journal: &mut RollbackJournal,
    ) -> Result<(), FsError> {
        let mut missing: Vec<&Path> = dest
            .ancestors()
            .skip(1)
            .take_while(|dir| !dir.as_os_str().is_empty() && !self.fs.exists(dir))
            .collect();
        missing.reverse();

        for dir in missing {
            journal.record_dir(dir);
            self.fs.create_dir(dir, policy)?;
            journal.mark_applied();
        }
        Ok(())
    }

    fn undo(&self, entry: JournalEntry, report: &mut RollbackReport) {
        if !entry.applied {
            return;
        }

        match entry.action {
            JournalAction::CreatedDir => {
                if self.fs.remove_dir(&entry.path).is_err() {
                    report.unrestored.push(entry.path);
                }
            }
            JournalAction::WroteFile { previous } => {
                let result = match &previous {
                    Some(snapshot) => self.fs.restore(snapshot, &entry.path),
                    None => self.fs.remove_file(&entry.path),
                };
                match result {
                    Ok(()) => report.restored += 1,
                    Err(_) => report.unrestored.push(entry.path),
                }
            }
        }
    }
}
