//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Every pipeline stage reports through this; the sinks decide how much
//! of it reaches the terminal or the NDJSON stream.

use std::path::PathBuf;

use crate::domain::services::FileAction;
use crate::domain::value_objects::{DeployScope, DeploymentStatus};

/// Event emitted during deploy operations
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Run started (lock held)
    Started {
        source_root: PathBuf,
        target_root: PathBuf,
        dry_run: bool,
    },

    /// Manifest resolved into a unit
    Resolved {
        files: usize,
        config: bool,
        scope: Option<DeployScope>,
    },

    /// Advisory validation finding
    Warning { path: PathBuf, message: String },

    /// Candidate config pre-flight self-test finished
    ConfigChecked { service: String, passed: bool },

    /// Every entry copied and verified in the staging area
    Staged { count: usize, staging_dir: PathBuf },

    /// One planned write (dry-run and confirmation both see these)
    Planned {
        index: usize,
        source: PathBuf,
        dest: PathBuf,
        action: FileAction,
    },

    /// File promoted into the live target
    FileCommitted { index: usize, path: PathBuf },

    /// Journal replayed after a failure
    RolledBack { restored: usize, unrestored: usize },

    /// Self-test of the now-live config
    ServiceChecked { service: String, passed: bool },

    /// Service reloaded
    Reloaded { service: String },

    /// Trigger resolved a unit and is about to count down
    Scheduled {
        scope: Option<DeployScope>,
        delay_secs: u64,
    },

    /// Trigger countdown tick
    Countdown { remaining_secs: u64 },

    /// Run stopped on an error (always followed by `Completed`)
    Failed {
        kind: &'static str,
        message: String,
        exit_code: i32,
    },

    /// Run finished
    Completed {
        status: DeploymentStatus,
        files_written: usize,
        reload_performed: bool,
    },
}

/// Trait for receiving deploy events
///
/// Implementations:
/// - ConsoleEventSink: human-readable lines on stderr
/// - JsonEventSink: NDJSON event stream for CI and hooks
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants per-file events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
