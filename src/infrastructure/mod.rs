//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local source tree and live file system, account lookup
//! - `service/` - Web server control through configured commands
//! - `events/` - NDJSON event sink
//! - `lock` - Per-target deployment lock
//! - `git` - Change-set discovery and hook installation

pub mod events;
pub mod fs;
pub mod git;
pub mod lock;
pub mod service;

// Re-export for convenience
pub use events::JsonEventSink;
pub use fs::{LocalFs, LocalSourceTree};
pub use lock::DeployLock;
pub use service::CommandService;
