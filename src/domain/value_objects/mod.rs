//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod change_set;
mod hash;
mod permissions;
mod scope;
mod status;
mod warning;

pub use change_set::ChangeSet;
pub use hash::ContentHash;
pub use permissions::{FileModes, Ownership, PermissionPolicy};
pub use scope::DeployScope;
pub use status::DeploymentStatus;
pub use warning::{ConfigWarning, ValidationWarning};
