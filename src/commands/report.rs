//! Event sinks and end-of-run output shared by the deploy commands

use std::sync::Arc;

use stagehand::application::DeploymentResult;
use stagehand::domain::ports::DeployEventSink;
use stagehand::domain::value_objects::DeploymentStatus;
use stagehand::infrastructure::JsonEventSink;

use crate::ui::components::diff::render_config_diff;
use crate::ui::context::UiContext;
use crate::ui::error::format_deploy_error;
use crate::ui::events::ConsoleEventSink;
use crate::ui::views::deploy::render_deploy_summary;

pub fn event_sink(ui: UiContext) -> Arc<dyn DeployEventSink> {
    if ui.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stderr(ui))
    }
}

/// Print the error block and summary; JSON mode already streamed `complete`
pub fn print_result(result: &DeploymentResult, ui: &UiContext) {
    if ui.json {
        return;
    }

    if ui.verbose > 0 && result.status == DeploymentStatus::DryRunOnly {
        if let Some(change) = result.plan.as_ref().and_then(|p| p.config_change.as_ref()) {
            eprint!("{}", render_config_diff(change, ui.color));
        }
    }

    if let Some(err) = &result.error {
        eprint!("{}", format_deploy_error(err, ui.color, ui.unicode));
    }
    print!("{}", render_deploy_summary(result, ui.color, ui.unicode));
}
