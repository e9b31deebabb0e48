//! Post-commit trigger: opt-out, countdown, then a forced deploy of what
//! the commit touched.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use stagehand::application::{
    Countdown, DeployUseCase, TriggerOptions, TriggerSignal, TriggerUseCase,
};
use stagehand::domain::value_objects::ChangeSet;
use stagehand::infrastructure::git;
use stagehand::infrastructure::{LocalFs, LocalSourceTree};

use super::report::{event_sink, print_result};
use super::workspace::Workspace;
use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;

const CONTROLLING_TERMINAL: &str = "/dev/tty";

#[derive(Debug, Clone, Default)]
pub struct PostCommitArgs {
    pub source: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub delay: Option<u64>,
    pub paths: Vec<PathBuf>,
}

pub fn cmd_post_commit(args: &PostCommitArgs, ui: UiContext) -> Result<i32> {
    let ws = Workspace::load(args.source.as_deref(), args.config.as_deref())?;
    print_config_warnings(&ws.warnings, &ui);

    let changes = if args.paths.is_empty() {
        let repo = git::repo_root(&ws.source_root)?;
        let repo = repo.canonicalize().unwrap_or(repo);
        let changed = git::changed_paths(&repo)?;
        ChangeSet::from_paths(changed.iter().map(|p| repo.join(p)), &ws.source_root)
    } else {
        ChangeSet::from_paths(&args.paths, &ws.source_root)
    };

    let delay = args.delay.unwrap_or(ws.config.trigger.delay_secs);
    let options = TriggerOptions::new(
        ws.deploy_options(false)?.with_changes(changes),
        Countdown::new(Duration::from_secs(delay)),
    )
    .with_env_opt_out();

    let (tx, rx) = mpsc::channel();
    let cancel = tx.clone();
    // Stays installed after the countdown: an interrupt then only reaches
    // a channel nobody reads, so it cannot cut a commit short.
    ctrlc::set_handler(move || {
        let _ = cancel.send(TriggerSignal::Cancel);
    })
    .context("cannot install the Ctrl+C handler")?;
    if !ui.json {
        listen_for_enter(tx);
    }

    let trigger = TriggerUseCase::new(DeployUseCase::new(
        LocalSourceTree::new(),
        LocalFs::new(),
        ws.service(),
    ));
    let result = trigger.execute_with_events(&options, &rx, event_sink(ui));

    print_result(&result, &ui);
    Ok(result.exit_code())
}

/// Enter on the controlling terminal deploys immediately
fn listen_for_enter(tx: Sender<TriggerSignal>) {
    let Ok(tty) = File::open(CONTROLLING_TERMINAL) else {
        return;
    };
    thread::spawn(move || {
        let mut line = String::new();
        if BufReader::new(tty).read_line(&mut line).is_ok_and(|n| n > 0) {
            let _ = tx.send(TriggerSignal::ProceedNow);
        }
    });
}
