//! Terminal status of a deployment run

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Success,
    Failed,
    DryRunOnly,
    Cancelled,
    /// The resolved unit was empty
    NothingToDeploy,
    /// Opted out before anything ran (`SKIP_DEPLOY`)
    Skipped,
}

impl DeploymentStatus {
    /// Whether the run ended without an error
    pub fn is_ok(&self) -> bool {
        !matches!(self, DeploymentStatus::Failed)
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DeploymentStatus::Success => "success",
            DeploymentStatus::Failed => "failed",
            DeploymentStatus::DryRunOnly => "dry run",
            DeploymentStatus::Cancelled => "cancelled",
            DeploymentStatus::NothingToDeploy => "nothing to deploy",
            DeploymentStatus::Skipped => "skipped",
        };
        f.write_str(s)
    }
}
