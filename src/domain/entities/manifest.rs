//! Manifest entity - the fixed definition of what a full deployment copies
//!
//! Paths are relative to the source root (assets additionally relative to
//! the target root). Built from configuration, consumed by the resolver.

use std::path::PathBuf;

/// One asset path (file or directory) in the fixed manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    pub path: PathBuf,
    /// Missing optional assets are skipped instead of failing the run
    pub required: bool,
}

impl AssetSpec {
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }
}

/// The one service configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSpec {
    /// Relative to the source root
    pub source: PathBuf,
    /// Absolute live path
    pub dest: PathBuf,
    pub service: String,
    pub requires_reload: bool,
}

/// Full fixed manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub assets: Vec<AssetSpec>,
    pub config: Option<ConfigSpec>,
}

impl Manifest {
    /// Drop the config entry (`--skip-nginx`)
    pub fn without_config(mut self) -> Self {
        self.config = None;
        self
    }
}
