//! Shell-command service control
//!
//! Drives the web server through two configured command lines, e.g.
//! `nginx -t -c {main_config}` and `systemctl reload nginx`. Commands are
//! split on whitespace and run directly, without a shell.
//!
//! A site config is a `server {}` fragment that nginx only accepts inside
//! `http {}`. `{main_config}` stands for a throwaway main config that
//! includes the fragment, written to the temp directory for the duration
//! of one check.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::NamedTempFile;

use crate::domain::ports::{CheckOutcome, ServiceControl};

/// Replaced by the path of the config under test
pub const CONFIG_PLACEHOLDER: &str = "{config}";

/// Replaced by a generated main config that includes the config under test
pub const MAIN_CONFIG_PLACEHOLDER: &str = "{main_config}";

/// Paths a command template may refer to
#[derive(Debug, Clone, Copy, Default)]
struct Substitutions<'a> {
    config: Option<&'a Path>,
    main_config: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct CommandService {
    name: String,
    test_command: String,
    reload_command: String,
    working_dir: Option<PathBuf>,
}

impl CommandService {
    pub fn new(
        name: impl Into<String>,
        test_command: impl Into<String>,
        reload_command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            test_command: test_command.into(),
            reload_command: reload_command.into(),
            working_dir: None,
        }
    }

    /// Run both commands from `dir`
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn run(&self, template: &str, subs: Substitutions<'_>) -> Result<Output, String> {
        let args = expand(template, subs);
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| format!("empty command for {}", self.name))?;

        let mut cmd = Command::new(program);
        cmd.args(rest);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd.output().map_err(|e| format!("cannot run {program}: {e}"))
    }
}

impl ServiceControl for CommandService {
    fn name(&self) -> &str {
        &self.name
    }

    fn check_config(&self, config: &Path) -> CheckOutcome {
        let main = if self.test_command.contains(MAIN_CONFIG_PLACEHOLDER) {
            match write_main_config(config) {
                Ok(file) => Some(file),
                Err(e) => {
                    return CheckOutcome::failed(format!("cannot write main config: {e}"));
                }
            }
        } else {
            None
        };

        let subs = Substitutions {
            config: Some(config),
            main_config: main.as_ref().map(|file| file.path()),
        };
        match self.run(&self.test_command, subs) {
            Ok(output) if output.status.success() => CheckOutcome::passed(combined(&output)),
            Ok(output) => CheckOutcome::failed(combined(&output)),
            Err(e) => CheckOutcome::failed(e),
        }
    }

    fn reload(&self) -> Result<(), String> {
        let output = self.run(&self.reload_command, Substitutions::default())?;
        if output.status.success() {
            Ok(())
        } else {
            let detail = combined(&output);
            Err(if detail.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {}", output.status, detail)
            })
        }
    }
}

/// nginx main config whose only job is to include `fragment`
fn main_config_for(fragment: &Path) -> String {
    format!(
        "events {{}}\nhttp {{\n    include \"{}\";\n}}\n",
        fragment.display()
    )
}

fn write_main_config(fragment: &Path) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix(".stagehand-main-")
        .suffix(".conf")
        .tempfile()?;
    file.write_all(main_config_for(fragment).as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Split a command template and substitute the placeholders
fn expand(template: &str, subs: Substitutions<'_>) -> Vec<String> {
    let config = subs.config.map(|p| p.display().to_string());
    let main_config = subs.main_config.map(|p| p.display().to_string());
    template
        .split_whitespace()
        .map(|arg| {
            let mut arg = arg.to_string();
            if let Some(path) = &main_config {
                arg = arg.replace(MAIN_CONFIG_PLACEHOLDER, path);
            }
            if let Some(path) = &config {
                arg = arg.replace(CONFIG_PLACEHOLDER, path);
            }
            arg
        })
        .collect()
}

/// stderr then stdout, trimmed; nginx reports on stderr
fn combined(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(stdout.trim());
    }
    text
}
