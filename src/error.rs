//! Error types for Stagehand
//!
//! Uses `thiserror` for library errors. `DeployError` is the failure
//! taxonomy of the deployment pipeline; `StagehandError` covers everything
//! around it (configuration, git, hook installation).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for non-pipeline Stagehand operations
pub type StagehandResult<T> = Result<T, StagehandError>;

/// Errors raised outside the deployment pipeline itself
#[derive(Error, Debug)]
pub enum StagehandError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Unknown owner or group name in `[permissions]` or `[service]`
    #[error("unknown {kind} '{name}' (not found in {database})")]
    UnknownAccount {
        kind: &'static str,
        name: String,
        database: String,
    },

    /// Invalid octal mode string in `[permissions]` or `[service]`
    #[error("invalid {field} '{value}': expected an octal mode such as 664")]
    InvalidMode { field: &'static str, value: String },

    /// Git invocation failed
    #[error("git {command} failed: {message}")]
    Git { command: String, message: String },

    /// Refusing to replace a hook we did not write
    #[error("{path} already exists and was not installed by stagehand (use --overwrite)")]
    ForeignHook { path: PathBuf },
}

/// Failure kinds of a deployment run
///
/// Pre-flight kinds (`MissingSource`, `StructureInvalid`,
/// `ConfigSyntaxInvalid`) and `StageFailed` never touch the live target.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("missing source files: {}", display_paths(.paths))]
    MissingSource { paths: Vec<PathBuf> },

    #[error("source tree is invalid: {}", display_problems(.problems))]
    StructureInvalid { problems: Vec<(PathBuf, String)> },

    #[error("config {path} failed the {service} self-test:\n{diagnostics}")]
    ConfigSyntaxInvalid {
        service: String,
        path: PathBuf,
        diagnostics: String,
    },

    #[error("staging failed for {path}: {reason}")]
    StageFailed { path: PathBuf, reason: String },

    #[error(
        "commit failed at {path} after {files_written} files written ({restored} restored): {reason}"
    )]
    CommitFailed {
        path: PathBuf,
        reason: String,
        files_written: usize,
        restored: usize,
        unrestored: Vec<PathBuf>,
    },

    #[error("{service} rejected the live config ({}):\n{diagnostics}", restore_note(.restored))]
    ReloadPreCheckFailed {
        service: String,
        diagnostics: String,
        restored: bool,
    },

    #[error("files are live but {service} reload failed, reload it manually: {reason}")]
    ReloadFailed { service: String, reason: String },

    #[error("another deployment holds the lock for {target_root} (lock file {lock_path})")]
    DeploymentInProgress {
        target_root: PathBuf,
        lock_path: PathBuf,
    },

    #[error("confirmation required but stdin is not a terminal (use --force)")]
    ConfirmationRequired,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// Process exit code for this failure kind
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::MissingSource { .. } => 2,
            DeployError::StructureInvalid { .. } => 3,
            DeployError::ConfigSyntaxInvalid { .. } => 4,
            DeployError::StageFailed { .. } => 5,
            DeployError::CommitFailed { .. } => 6,
            DeployError::ReloadPreCheckFailed { .. } => 7,
            DeployError::ReloadFailed { .. } => 8,
            DeployError::DeploymentInProgress { .. } => 9,
            DeployError::ConfirmationRequired => 10,
            DeployError::Io(_) => 1,
        }
    }

    /// Short machine-readable name (used by the JSON event stream)
    pub fn kind(&self) -> &'static str {
        match self {
            DeployError::MissingSource { .. } => "missing_source",
            DeployError::StructureInvalid { .. } => "structure_invalid",
            DeployError::ConfigSyntaxInvalid { .. } => "config_syntax_invalid",
            DeployError::StageFailed { .. } => "stage_failed",
            DeployError::CommitFailed { .. } => "commit_failed",
            DeployError::ReloadPreCheckFailed { .. } => "reload_precheck_failed",
            DeployError::ReloadFailed { .. } => "reload_failed",
            DeployError::DeploymentInProgress { .. } => "deployment_in_progress",
            DeployError::ConfirmationRequired => "confirmation_required",
            DeployError::Io(_) => "io",
        }
    }

    /// Whether the live target was mutated and left mutated
    pub fn left_live_changes(&self) -> bool {
        match self {
            DeployError::CommitFailed { unrestored, .. } => !unrestored.is_empty(),
            DeployError::ReloadPreCheckFailed { restored, .. } => !restored,
            DeployError::ReloadFailed { .. } => true,
            _ => false,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn restore_note(restored: &bool) -> &'static str {
    if *restored {
        "previous config restored"
    } else {
        "restore failed, the rejected config is still live"
    }
}

fn display_problems(problems: &[(PathBuf, String)]) -> String {
    problems
        .iter()
        .map(|(p, why)| format!("{} ({})", p.display(), why))
        .collect::<Vec<_>>()
        .join(", ")
}
