//! Configuration module for Stagehand
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (STAGEHAND_*)
//! 3. `--config FILE`, or `deploy.toml` in the source root
//! 4. User config (~/.config/stagehand/deploy.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, CONFIG_FILE_NAME};
pub use types::{
    AssetConfig, Config, LayoutConfig, LockConfig, PermissionsConfig, ServiceConfig,
    StagingConfig, TriggerConfig,
};
