//! File System Implementations
//!
//! Concrete implementations of the file system ports, plus account
//! lookup for ownership settings and root path normalization.

mod accounts;
mod local;
mod paths;

#[cfg(test)]
pub(crate) mod testing;

pub use accounts::AccountDb;
pub use local::{LocalFs, LocalSourceTree, DEPLOY_IGNORE_FILE};
pub use paths::normalize_path;
