//! Stagehand - staged, rollback-safe deployment of a static admin portal
//!
//! A run resolves the files a change touches, validates and stages them,
//! commits them to the live target under a rollback journal and reloads
//! the web server when its config changed. A post-commit trigger wraps
//! the same pipeline in a cancellable countdown.
//!
//! Layers:
//! - `domain` - pipeline stages and the ports they run against
//! - `application` - the deploy and trigger use cases
//! - `infrastructure` - local file system, service commands, lock, git
//! - `config` - `deploy.toml` loading

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    Countdown, DeployOptions, DeployUseCase, DeploymentResult, TriggerOptions, TriggerUseCase,
};
pub use config::Config;
pub use domain::value_objects::{ChangeSet, DeployScope, DeploymentStatus};
pub use error::{DeployError, StagehandError, StagehandResult};
