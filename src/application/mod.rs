//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - One locked pipeline run (resolve, validate, stage, plan, confirm, commit, reload)
//! - `TriggerUseCase` - Post-commit opt-out, countdown and hand-off to `DeployUseCase`

pub mod deploy;
pub mod trigger;

pub use deploy::{DeployOptions, DeployUseCase, DeploymentResult};
pub use trigger::{
    Countdown, CountdownOutcome, TriggerOptions, TriggerSignal, TriggerUseCase, OPT_OUT_VAR,
};
