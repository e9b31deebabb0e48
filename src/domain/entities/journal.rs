//! Rollback journal entity
//!
//! Append-only record of every destructive step the committer is about to
//! take, in write order. Replayed in reverse on failure, dropped on success.

use std::path::{Path, PathBuf};

/// Saved state of a live file before it was overwritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot {
    /// Private copy of the previous content
    pub backup: PathBuf,
    pub mode: Option<u32>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
}

/// What a journal entry undoes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalAction {
    /// Directory created implicitly for a destination
    CreatedDir,
    /// File written; `previous` is absent when nothing existed before
    WroteFile { previous: Option<FileSnapshot> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub path: PathBuf,
    pub action: JournalAction,
    /// Set once the step completed
    pub applied: bool,
}

impl JournalEntry {
    pub fn is_file(&self) -> bool {
        matches!(self.action, JournalAction::WroteFile { .. })
    }
}

#[derive(Debug, Default)]
pub struct RollbackJournal {
    entries: Vec<JournalEntry>,
}

impl RollbackJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directory about to be created
    pub fn record_dir(&mut self, path: impl Into<PathBuf>) {
        self.push(path.into(), JournalAction::CreatedDir);
    }

    /// Record a file about to be written
    pub fn record_file(&mut self, path: impl Into<PathBuf>, previous: Option<FileSnapshot>) {
        self.push(path.into(), JournalAction::WroteFile { previous });
    }

    /// Mark the most recently recorded step as completed
    pub fn mark_applied(&mut self) {
        if let Some(last) = self.entries.last_mut() {
            last.applied = true;
        }
    }

    /// Remove and return the file entry for `path`, leaving the rest intact
    pub fn take_file(&mut self, path: &Path) -> Option<JournalEntry> {
        let index = self
            .entries
            .iter()
            .rposition(|e| e.is_file() && e.path == path)?;
        Some(self.entries.remove(index))
    }

    /// Remove and return the created directories above `path` that no other
    /// remaining entry lives under, innermost first
    pub fn take_dirs_only_for(&mut self, path: &Path) -> Vec<JournalEntry> {
        let owned: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_file() && path.starts_with(&e.path))
            .filter(|(_, dir)| {
                !self
                    .entries
                    .iter()
                    .any(|other| {
                        other.path.starts_with(&dir.path) && !path.starts_with(&other.path)
                    })
            })
            .map(|(index, _)| index)
            .collect();

        // Directories are recorded top-down, so the highest index is innermost
        owned
            .into_iter()
            .rev()
            .map(|index| self.entries.remove(index))
            .collect()
    }

    /// Consume the journal, newest entry first
    pub fn into_reverse(self) -> impl Iterator<Item = JournalEntry> {
        self.entries.into_iter().rev()
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Files whose write completed
    pub fn files_written(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.is_file() && e.applied)
            .count()
    }

    fn push(&mut self, path: PathBuf, action: JournalAction) {
        self.entries.push(JournalEntry {
            path,
            action,
            applied: false,
        });
    }
}
