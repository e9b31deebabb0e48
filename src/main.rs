//! deploy - staged, rollback-safe deployment of the admin portal
//!
//! Usage: deploy [--dry-run] [--force] [--skip-nginx]
//!
//! Commands:
//!   install-hook  Install the git post-commit hook
//!   post-commit   Countdown, then deploy what the last commit touched (hook only)

mod cli;
mod commands;
mod ui;

use clap::Parser;

use cli::{Cli, Commands};
use commands::deploy::{cmd_deploy, DeployArgs};
use commands::install_hook::{cmd_install_hook, InstallHookArgs};
use commands::post_commit::{cmd_post_commit, PostCommitArgs};
use ui::context::UiContext;

fn main() {
    let cli = Cli::parse();
    let ui = UiContext::new(cli.json, cli.verbose, cli.color);

    let outcome = match cli.command {
        None => cmd_deploy(
            &DeployArgs {
                source: cli.source,
                config: cli.config,
                dry_run: cli.dry_run,
                force: cli.force,
                skip_service: cli.skip_nginx,
            },
            ui,
        ),
        Some(Commands::PostCommit { delay, paths }) => cmd_post_commit(
            &PostCommitArgs {
                source: cli.source,
                config: cli.config,
                delay,
                paths,
            },
            ui,
        ),
        Some(Commands::InstallHook { repo, overwrite }) => cmd_install_hook(
            &InstallHookArgs {
                source: cli.source,
                repo,
                overwrite,
            },
            ui,
        ),
    };

    let code = match outcome {
        Ok(code) => code,
        Err(err) => {
            ui::error::print_error(&err, ui.json);
            1
        }
    };
    std::process::exit(code);
}
