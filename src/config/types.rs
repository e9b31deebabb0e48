//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{AssetSpec, ConfigSpec, Manifest};
use crate::domain::value_objects::{FileModes, Ownership, PermissionPolicy};
use crate::error::{StagehandError, StagehandResult};
use crate::infrastructure::fs::{normalize_path, AccountDb};

use super::loader::{self, ConfigWarning};

/// Where assets live and where they go
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_target_root")]
    pub target_root: PathBuf,

    #[serde(default = "default_assets")]
    pub assets: Vec<AssetConfig>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            target_root: default_target_root(),
            assets: default_assets(),
        }
    }
}

fn default_target_root() -> PathBuf {
    PathBuf::from("/var/www/admin-portal")
}

fn default_assets() -> Vec<AssetConfig> {
    vec![
        AssetConfig::required("index.html"),
        AssetConfig::required("images"),
    ]
}

/// One manifest asset (file or directory, relative to both roots).
///
/// Accepts either form:
///   assets = ["index.html", "images"]
///   assets = [{ path = "favicon.ico", required = false }]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetConfig {
    pub path: PathBuf,
    pub required: bool,
}

impl AssetConfig {
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AssetConfigDe {
    Path(PathBuf),
    Table {
        path: PathBuf,
        #[serde(default = "default_true")]
        required: bool,
    },
}

impl<'de> Deserialize<'de> for AssetConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match AssetConfigDe::deserialize(deserializer)? {
            AssetConfigDe::Path(path) => Ok(Self::required(path)),
            AssetConfigDe::Table { path, required } => Ok(Self { path, required }),
        }
    }
}

/// The external service and its one config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Relative to the source root
    #[serde(default = "default_config_source")]
    pub config_source: PathBuf,

    /// Absolute, or relative to the target root
    #[serde(default = "default_config_dest")]
    pub config_dest: PathBuf,

    /// Self-test; `{config}` is replaced with the file under test and
    /// `{main_config}` with a generated main config that includes it
    #[serde(default = "default_test_command")]
    pub test_command: String,

    #[serde(default = "default_reload_command")]
    pub reload_command: String,

    #[serde(default = "default_true")]
    pub requires_reload: bool,

    /// Owner of the live config; empty leaves ownership alone
    #[serde(default = "default_config_owner")]
    pub config_owner: String,

    #[serde(default)]
    pub config_group: String,

    #[serde(default = "default_config_mode")]
    pub config_mode: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            config_source: default_config_source(),
            config_dest: default_config_dest(),
            test_command: default_test_command(),
            reload_command: default_reload_command(),
            requires_reload: true,
            config_owner: default_config_owner(),
            config_group: String::new(),
            config_mode: default_config_mode(),
        }
    }
}

fn default_service_name() -> String {
    "nginx".to_string()
}

fn default_config_source() -> PathBuf {
    PathBuf::from("nginx/admin-portal.conf")
}

fn default_config_dest() -> PathBuf {
    PathBuf::from("/etc/nginx/sites-available/admin-portal")
}

fn default_test_command() -> String {
    "nginx -t -c {main_config}".to_string()
}

fn default_reload_command() -> String {
    "systemctl reload nginx".to_string()
}

fn default_config_owner() -> String {
    "root".to_string()
}

fn default_config_mode() -> String {
    "644".to_string()
}

/// Ownership and modes applied on commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionsConfig {
    /// User name or uid; empty leaves ownership alone
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Group name or gid; empty leaves the group alone
    #[serde(default)]
    pub group: String,

    #[serde(default = "default_file_mode")]
    pub file_mode: String,

    #[serde(default = "default_dir_mode")]
    pub dir_mode: String,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            group: String::new(),
            file_mode: default_file_mode(),
            dir_mode: default_dir_mode(),
        }
    }
}

fn default_owner() -> String {
    "www-data".to_string()
}

fn default_file_mode() -> String {
    "664".to_string()
}

fn default_dir_mode() -> String {
    "755".to_string()
}

/// Post-commit countdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
        }
    }
}

fn default_delay_secs() -> u64 {
    5
}

/// Directory holding per-target lock files
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LockConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Parent directory for staging areas and commit backups
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StagingConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub permissions: PermissionsConfig,

    #[serde(default)]
    pub trigger: TriggerConfig,

    #[serde(default)]
    pub lock: LockConfig,

    #[serde(default)]
    pub staging: StagingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> StagehandResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> StagehandResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load the config for a source tree: explicit file, `deploy.toml` in
    /// the source root, user config, then defaults. Env overrides applied.
    pub fn load_for_source(
        source_root: &Path,
        explicit: Option<&Path>,
    ) -> StagehandResult<(Self, Vec<ConfigWarning>)> {
        loader::load_for_source(source_root, explicit)
    }

    /// Apply environment variable overrides (STAGEHAND_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// The fixed manifest described by `[layout]` and `[service]`
    pub fn manifest(&self) -> Manifest {
        let assets = self
            .layout
            .assets
            .iter()
            .map(|a| AssetSpec {
                path: a.path.clone(),
                required: a.required,
            })
            .collect();

        Manifest {
            assets,
            config: Some(ConfigSpec {
                source: self.service.config_source.clone(),
                dest: self.config_dest(),
                service: self.service.name.clone(),
                requires_reload: self.service.requires_reload,
            }),
        }
    }

    /// Live config path, resolved against the target root when relative
    pub fn config_dest(&self) -> PathBuf {
        self.layout.target_root.join(&self.service.config_dest)
    }

    /// Make the target root and the directories absolute and normalized.
    ///
    /// Relative values are taken against `base`; a relative `config_dest`
    /// stays relative to the target root.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.layout.target_root = normalize_path(base, &self.layout.target_root);
        self.service.config_dest =
            normalize_path(&self.layout.target_root, &self.service.config_dest);
        self.lock.dir = self.lock.dir.map(|dir| normalize_path(base, &dir));
        self.staging.dir = self.staging.dir.map(|dir| normalize_path(base, &dir));
        self
    }

    pub fn lock_dir(&self) -> PathBuf {
        self.lock.dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.staging.dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Asset modes and ownership, resolving names in `accounts`
    pub fn permission_policy(&self, accounts: AccountDb<'_>) -> StagehandResult<PermissionPolicy> {
        let p = &self.permissions;
        let modes = FileModes {
            file: parse_mode("file_mode", &p.file_mode)?,
            dir: parse_mode("dir_mode", &p.dir_mode)?,
        };
        let ownership = ownership(&p.owner, &p.group, accounts)?;

        Ok(PermissionPolicy { modes, ownership })
    }

    /// Mode and ownership for the service config and the directories
    /// created for it
    pub fn config_policy(&self, accounts: AccountDb<'_>) -> StagehandResult<PermissionPolicy> {
        let svc = &self.service;
        let modes = FileModes {
            file: parse_mode("config_mode", &svc.config_mode)?,
            dir: parse_mode("dir_mode", &self.permissions.dir_mode)?,
        };
        let ownership = ownership(&svc.config_owner, &svc.config_group, accounts)?;

        Ok(PermissionPolicy { modes, ownership })
    }
}

fn parse_mode(field: &'static str, value: &str) -> StagehandResult<u32> {
    FileModes::parse_octal(value).ok_or_else(|| StagehandError::InvalidMode {
        field,
        value: value.to_string(),
    })
}

fn ownership(owner: &str, group: &str, accounts: AccountDb<'_>) -> StagehandResult<Ownership> {
    Ok(Ownership {
        uid: non_empty(owner).map(|name| accounts.owner(name)).transpose()?,
        gid: non_empty(group).map(|name| accounts.group(name)).transpose()?,
    })
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
