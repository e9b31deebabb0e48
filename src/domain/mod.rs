//! Domain Layer
//!
//! The deployment pipeline without any concrete I/O.
//!
//! ## Structure
//!
//! - `entities/` - Manifest, DeploymentUnit, RollbackJournal
//! - `value_objects/` - ContentHash, ChangeSet, DeployScope, PermissionPolicy
//! - `services/` - Resolver, Validator, Stager, Planner, Committer, Reloader
//! - `ports/` - Interfaces implemented by `infrastructure`
//!
//! All file and process access goes through the traits in `ports`.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
