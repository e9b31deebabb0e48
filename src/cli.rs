use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// deploy - staged, rollback-safe deployment of the admin portal
#[derive(Parser, Debug)]
#[command(name = "deploy")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "Set SKIP_DEPLOY=1 to skip the post-commit hook for one commit.")]
pub struct Cli {
    /// Validate, stage and show the plan without writing anything live
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,

    /// Leave the web-server config alone: no config copy, self-test or reload
    #[arg(long, visible_alias = "skip-service")]
    pub skip_nginx: bool,

    /// Source tree (git working copy); defaults to the current directory
    #[arg(short, long, global = true)]
    pub source: Option<PathBuf>,

    /// Config file (default: <source>/deploy.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output NDJSON events on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// When to use colors
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy after a commit, with a cancellable countdown (run by the git hook)
    #[command(hide = true)]
    PostCommit {
        /// Seconds to wait before deploying (default from [trigger] delay_secs)
        #[arg(long)]
        delay: Option<u64>,

        /// Changed paths; read from the last commit when omitted
        paths: Vec<PathBuf>,
    },

    /// Install the git post-commit hook that runs `deploy post-commit`
    InstallHook {
        /// Repository to install into (default: the source tree)
        #[arg(long)]
        repo: Option<PathBuf>,

        /// Replace an existing hook not written by deploy
        #[arg(long)]
        overwrite: bool,
    },
}
