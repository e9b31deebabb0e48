//! Deploy Module
//!
//! Runs the deployment pipeline once, under the per-target lock.
//!
//! ## Structure
//!
//! - `options` - Run configuration (`DeployOptions`)
//! - `result` - Outcome of a run (`DeploymentResult`)
//! - `use_case` - The pipeline itself (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use stagehand::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(LocalSourceTree::new(), LocalFs::new(), service);
//! let result = use_case.execute(&DeployOptions::new(source, target, manifest));
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::DeploymentResult;
pub use use_case::DeployUseCase;
