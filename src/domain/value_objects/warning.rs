//! Warning value objects.
//!
//! Warnings never block a run; they are always handed back to the caller.

use std::path::PathBuf;

/// Advisory finding from the validator's soft content check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Source file the finding applies to
    pub path: PathBuf,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Non-fatal configuration warning surfaced to CLI users.
///
/// Raised while loading `deploy.toml` (e.g., unknown keys).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The unknown or problematic key
    pub key: String,
    /// The file where the warning occurred
    pub file: PathBuf,
    /// The line number (1-indexed) if available
    pub line: Option<usize>,
    /// A suggested correction if available
    pub suggestion: Option<String>,
}
