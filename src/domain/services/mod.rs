//! Domain Services
//!
//! The pipeline stages. Each one is generic over the ports it needs and
//! holds no state between runs.

mod committer;
mod planner;
mod reloader;
mod resolver;
mod stager;
mod validator;

pub use committer::{CommitReceipt, Committer, RollbackReport};
pub use planner::{ConfigChange, DeploymentPlan, FileAction, PlannedFile, Planner};
pub use reloader::Reloader;
pub use resolver::{ManifestResolver, Resolution};
pub use stager::{StagedFile, Stager, StagingArea};
pub use validator::Validator;
