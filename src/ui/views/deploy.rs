use std::path::Path;

use stagehand::application::DeploymentResult;
use stagehand::domain::services::{DeploymentPlan, FileAction};
use stagehand::domain::value_objects::DeploymentStatus;
use stagehand::error::DeployError;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::{ResultSummary, SummaryTone};
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub struct HeaderInfo<'a> {
    pub source: &'a Path,
    pub target: &'a Path,
    pub config_file: Option<&'a Path>,
    pub dry_run: bool,
    pub force: bool,
    pub skip_service: Option<&'a str>,
}

pub fn render_deploy_header(info: &HeaderInfo<'_>, supports_color: bool, supports_unicode: bool) -> String {
    let title = if info.dry_run { "Deploy (dry run)" } else { "Deploy" };
    let mut header = CommandHeader::new(Icon::Deploy, title);
    header.add("Source", info.source.display().to_string());
    header.add("Target", info.target.display().to_string());
    if let Some(file) = info.config_file {
        header.add("Config", file.display().to_string());
    }
    if info.force {
        header.add("Mode", "forced (no confirmation)");
    }
    if let Some(service) = info.skip_service {
        header.add("Skip", format!("{service} config and reload"));
    }
    header.render(supports_color, supports_unicode)
}

/// One row of the plan: action, then destination
pub fn render_plan_line(action: FileAction, dest: &Path, supports_color: bool) -> String {
    let (sign, label) = match action {
        FileAction::Create => ("+", ColoredText::success(format!("{:<9}", action.to_string()))),
        FileAction::Update => ("~", ColoredText::warning(format!("{:<9}", action.to_string()))),
        FileAction::Unchanged => ("=", ColoredText::dim(format!("{:<9}", action.to_string()))),
    };
    format!("  {sign} {} {}", label.render(supports_color), dest.display())
}

/// One-line tally of a plan, e.g. "1 create, 2 update, 0 unchanged"
pub fn plan_tally(plan: &DeploymentPlan) -> String {
    [FileAction::Create, FileAction::Update, FileAction::Unchanged]
        .iter()
        .map(|a| format!("{} {}", plan.count(*a), a))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_deploy_summary(result: &DeploymentResult, supports_color: bool, supports_unicode: bool) -> String {
    let mut summary = match result.status {
        DeploymentStatus::Success => ResultSummary::new("Deployed", SummaryTone::Success),
        DeploymentStatus::DryRunOnly => {
            ResultSummary::new("Dry run complete, nothing written", SummaryTone::Notice)
        }
        DeploymentStatus::NothingToDeploy => ResultSummary::new("Nothing to deploy", SummaryTone::Notice),
        DeploymentStatus::Skipped => ResultSummary::new("Deploy skipped", SummaryTone::Notice),
        DeploymentStatus::Cancelled => ResultSummary::new("Deploy cancelled", SummaryTone::Notice),
        DeploymentStatus::Failed => ResultSummary::new("Deploy failed", SummaryTone::Failure),
    };

    if let Some(reason) = &result.reason {
        summary.add_stat("Reason", reason);
    }
    if let Some(scope) = result.scope {
        summary.add_stat("Scope", scope);
    }
    if let Some(plan) = &result.plan {
        summary.add_stat("Plan", plan_tally(plan));
    }
    if matches!(result.status, DeploymentStatus::Success | DeploymentStatus::Failed) {
        summary.add_stat("Files written", result.files_written);
        summary.add_stat("Reloaded", if result.reload_performed { "yes" } else { "no" });
    }
    summary.add_stat("Took", format!("{} ms", result.duration_ms()));

    for warning in &result.warnings {
        summary.add_warning(format!("{}: {}", warning.path.display(), warning.message));
    }

    match (&result.status, &result.error) {
        (DeploymentStatus::DryRunOnly, _) => summary.with_next_step("run again without --dry-run to apply"),
        (_, Some(err)) => {
            if err.left_live_changes() {
                summary.add_warning("the live target was left changed");
            }
            if let Some(hint) = next_step(err) {
                summary.with_next_step(hint);
            }
        }
        _ => {}
    }

    summary.render(supports_color, supports_unicode)
}

fn next_step(err: &DeployError) -> Option<&'static str> {
    match err {
        DeployError::ConfirmationRequired => Some("re-run with --force, or from a terminal"),
        DeployError::DeploymentInProgress { .. } => Some("wait for the running deploy to finish"),
        DeployError::ReloadFailed { .. } => Some("reload the service by hand"),
        DeployError::CommitFailed { unrestored, .. } if !unrestored.is_empty() => {
            Some("restore the listed files by hand before deploying again")
        }
        _ => None,
    }
}
