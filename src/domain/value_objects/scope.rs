//! Scope value object - which halves of the portal a run touches
//!
//! - `Full`: assets and the service config
//! - `WebOnly`: assets only, the service is never tested or reloaded
//! - `ConfigOnly`: the service config only

use serde::{Deserialize, Serialize};

/// Scope of a deployment unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeployScope {
    Full,
    WebOnly,
    ConfigOnly,
}

impl DeployScope {
    /// Derive the scope from what a unit contains; `None` when it is empty
    pub fn from_parts(has_assets: bool, has_config: bool) -> Option<Self> {
        match (has_assets, has_config) {
            (true, true) => Some(DeployScope::Full),
            (true, false) => Some(DeployScope::WebOnly),
            (false, true) => Some(DeployScope::ConfigOnly),
            (false, false) => None,
        }
    }

    /// Returns true if the service config is part of the run
    pub fn touches_config(&self) -> bool {
        matches!(self, DeployScope::Full | DeployScope::ConfigOnly)
    }
}

impl std::fmt::Display for DeployScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeployScope::Full => write!(f, "full"),
            DeployScope::WebOnly => write!(f, "web-only"),
            DeployScope::ConfigOnly => write!(f, "config-only"),
        }
    }
}
