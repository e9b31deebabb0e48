//! Plan confirmation port
//!
//! The committer only runs after the plan is confirmed. `--force` and the
//! post-commit trigger use `AutoConfirm`; the CLI prompts on a terminal.

use crate::domain::services::DeploymentPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmDecision {
    Proceed,
    Decline,
    /// Nobody can be asked (no terminal)
    Unavailable,
}

pub trait PlanConfirmer: Send + Sync {
    fn confirm(&self, plan: &DeploymentPlan) -> ConfirmDecision;
}

/// Confirms every plan without asking
pub struct AutoConfirm;

impl PlanConfirmer for AutoConfirm {
    fn confirm(&self, _plan: &DeploymentPlan) -> ConfirmDecision {
        ConfirmDecision::Proceed
    }
}

/// Nobody to ask; unforced runs fail with `ConfirmationRequired`
pub struct Unattended;

impl PlanConfirmer for Unattended {
    fn confirm(&self, _plan: &DeploymentPlan) -> ConfirmDecision {
        ConfirmDecision::Unavailable
    }
}
