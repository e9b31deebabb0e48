//! Source tree + configuration shared by every command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use stagehand::application::DeployOptions;
use stagehand::config::{Config, ConfigWarning, CONFIG_FILE_NAME};
use stagehand::infrastructure::fs::AccountDb;
use stagehand::infrastructure::CommandService;

pub struct Workspace {
    pub source_root: PathBuf,
    pub config: Config,
    /// The config file in effect, if any
    pub config_file: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

impl Workspace {
    pub fn load(source: Option<&Path>, config_file: Option<&Path>) -> Result<Self> {
        let source_root = match source {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().context("cannot determine the current directory")?,
        };
        let source_root = source_root
            .canonicalize()
            .with_context(|| format!("source tree {} not found", source_root.display()))?;

        let (config, warnings) = Config::load_for_source(&source_root, config_file)?;
        let config_file = match config_file {
            Some(file) => Some(file.to_path_buf()),
            None => Some(source_root.join(CONFIG_FILE_NAME)).filter(|f| f.is_file()),
        };

        Ok(Self {
            source_root,
            config,
            config_file,
            warnings,
        })
    }

    pub fn target_root(&self) -> &Path {
        &self.config.layout.target_root
    }

    /// Pipeline options from the config; `skip_service` drops the config entry
    pub fn deploy_options(&self, skip_service: bool) -> Result<DeployOptions> {
        let policy = self.config.permission_policy(AccountDb::System)?;
        let config_policy = if skip_service {
            policy
        } else {
            self.config.config_policy(AccountDb::System)?
        };
        Ok(DeployOptions::new(
            &self.source_root,
            self.target_root(),
            self.config.manifest(),
        )
        .with_policy(policy)
        .with_config_policy(config_policy)
        .with_lock_dir(self.config.lock_dir())
        .with_staging_dir(self.config.staging_dir())
        .with_skip_service(skip_service))
    }

    /// The configured web server, run from the source root
    pub fn service(&self) -> CommandService {
        let svc = &self.config.service;
        CommandService::new(&svc.name, &svc.test_command, &svc.reload_command)
            .in_dir(&self.source_root)
    }
}
