use std::path::PathBuf;

use anyhow::{Context, Result};

use stagehand::infrastructure::git;

use crate::ui::context::UiContext;
use crate::ui::views::hook::render_hook_installed;

#[derive(Debug, Clone, Default)]
pub struct InstallHookArgs {
    pub source: Option<PathBuf>,
    pub repo: Option<PathBuf>,
    pub overwrite: bool,
}

pub fn cmd_install_hook(args: &InstallHookArgs, ui: UiContext) -> Result<i32> {
    let repo = match args.repo.clone().or_else(|| args.source.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };
    let program = std::env::current_exe().context("cannot locate the deploy executable")?;

    let install = git::install_hook(&repo, &program, args.overwrite)?;

    if ui.json {
        let event = serde_json::json!({
            "event": "hook_installed",
            "path": install.path.display().to_string(),
            "replaced": install.replaced,
        });
        println!("{event}");
    } else {
        print!("{}", render_hook_installed(&install, ui.color, ui.unicode));
    }
    Ok(0)
}
