//! Deploy Result
//!
//! Result types for deploy operations.

use chrono::{DateTime, Utc};

use crate::domain::services::DeploymentPlan;
use crate::domain::value_objects::{DeployScope, DeploymentStatus, ValidationWarning};
use crate::error::DeployError;

/// Outcome of one pipeline run
#[derive(Debug)]
pub struct DeploymentResult {
    pub status: DeploymentStatus,
    /// Why the run stopped short (skip, cancel, nothing to deploy)
    pub reason: Option<String>,
    pub scope: Option<DeployScope>,
    pub files_written: usize,
    pub reload_performed: bool,
    /// Soft validation findings; never fatal
    pub warnings: Vec<ValidationWarning>,
    /// Present once staging succeeded
    pub plan: Option<DeploymentPlan>,
    pub error: Option<DeployError>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl DeploymentResult {
    pub fn new(status: DeploymentStatus) -> Self {
        let now = Utc::now();
        Self {
            status,
            reason: None,
            scope: None,
            files_written: 0,
            reload_performed: false,
            warnings: Vec::new(),
            plan: None,
            error: None,
            started_at: now,
            finished_at: now,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.status.is_ok()
    }

    /// Process exit code: 0 unless the run failed
    pub fn exit_code(&self) -> i32 {
        self.error.as_ref().map_or(0, DeployError::exit_code)
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
