use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use stagehand::application::DeployUseCase;
use stagehand::domain::ports::{AutoConfirm, PlanConfirmer};
use stagehand::infrastructure::{LocalFs, LocalSourceTree};

use super::report::{event_sink, print_result};
use super::workspace::Workspace;
use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;
use crate::ui::prompt::PromptConfirmer;
use crate::ui::views::deploy::{render_deploy_header, HeaderInfo};

#[derive(Debug, Clone, Default)]
pub struct DeployArgs {
    pub source: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub force: bool,
    pub skip_service: bool,
}

/// One pipeline run; returns the process exit code
pub fn cmd_deploy(args: &DeployArgs, ui: UiContext) -> Result<i32> {
    let ws = Workspace::load(args.source.as_deref(), args.config.as_deref())?;
    print_config_warnings(&ws.warnings, &ui);

    let options = ws
        .deploy_options(args.skip_service)?
        .with_dry_run(args.dry_run)
        .with_force(args.force);

    if !ui.json {
        print!(
            "{}",
            render_deploy_header(
                &HeaderInfo {
                    source: &ws.source_root,
                    target: ws.target_root(),
                    config_file: ws.config_file.as_deref(),
                    dry_run: args.dry_run,
                    force: args.force,
                    skip_service: args.skip_service.then_some(ws.config.service.name.as_str()),
                },
                ui.color,
                ui.unicode,
            )
        );
    }

    let confirmer: Arc<dyn PlanConfirmer> = if args.force {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(PromptConfirmer::new(ui))
    };

    let use_case = DeployUseCase::new(LocalSourceTree::new(), LocalFs::new(), ws.service());
    let result = use_case.execute_full(&options, event_sink(ui), confirmer);

    print_result(&result, &ui);
    Ok(result.exit_code())
}
