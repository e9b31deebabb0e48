use stagehand::error::{DeployError, StagehandError};

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::terminal::detect_capabilities;

pub fn format_deploy_error(err: &DeployError, supports_color: bool, supports_unicode: bool) -> String {
    let block = match err {
        DeployError::MissingSource { paths } => {
            ErrorBlock::new("Missing source files", format!("{} required paths do not exist", paths.len()))
                .with_paths(paths.iter().cloned())
                .with_fix("restore them, or mark the asset `required = false` in deploy.toml")
        }
        DeployError::StructureInvalid { problems } => ErrorBlock::new(
            "Source tree is invalid",
            problems
                .iter()
                .map(|(path, why)| format!("{}: {}", path.display(), why))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        DeployError::ConfigSyntaxInvalid {
            service,
            path,
            diagnostics,
        } => ErrorBlock::new(
            "Config rejected",
            format!("{service} rejected {}; nothing was deployed", path.display()),
        )
        .with_details(diagnostics.as_str()),
        DeployError::StageFailed { path, reason } => {
            ErrorBlock::new("Staging failed", format!("{}: {}", path.display(), reason))
                .with_fix("nothing live was touched; check free space in the staging dir")
        }
        DeployError::CommitFailed {
            path, unrestored, ..
        } => {
            let block = ErrorBlock::new("Commit failed", err.to_string());
            if unrestored.is_empty() {
                block.with_fix(format!(
                    "every write was rolled back; fix the cause at {} and re-run",
                    path.display()
                ))
            } else {
                block
                    .with_paths(unrestored.iter().cloned())
                    .with_fix("the paths above could not be restored; restore them by hand")
            }
        }
        DeployError::ReloadPreCheckFailed { diagnostics, .. } => {
            ErrorBlock::new("Live config rejected", err.to_string().lines().next().unwrap_or_default())
                .with_details(diagnostics.as_str())
        }
        DeployError::ReloadFailed { reason, .. } => {
            ErrorBlock::new("Reload failed", err.to_string()).with_details(reason.as_str())
        }
        DeployError::DeploymentInProgress { lock_path, .. } => {
            ErrorBlock::new("Deployment in progress", err.to_string())
                .with_fix(format!("wait for it; the lock is released when {} is unlocked", lock_path.display()))
        }
        DeployError::ConfirmationRequired => ErrorBlock::new("Confirmation required", err.to_string()),
        DeployError::Io(_) => ErrorBlock::new("IO error", err.to_string()),
    };
    block.render(supports_color, supports_unicode)
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    if let Some(deploy) = err.downcast_ref::<DeployError>() {
        return format_deploy_error(deploy, supports_color, supports_unicode);
    }

    let title = match err.downcast_ref::<StagehandError>() {
        Some(StagehandError::InvalidConfig { .. })
        | Some(StagehandError::InvalidMode { .. })
        | Some(StagehandError::UnknownAccount { .. }) => "Configuration error",
        Some(StagehandError::Git { .. }) => "Git error",
        Some(StagehandError::ForeignHook { .. }) => "Hook not installed",
        Some(StagehandError::Io(_)) | None => "Error",
    };
    ErrorBlock::new(title, format!("{err:#}")).render(supports_color, supports_unicode)
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let output = serde_json::json!({
            "event": "error",
            "kind": "internal",
            "message": format!("{err:#}"),
        });
        println!("{output}");
        return;
    }

    let caps = detect_capabilities();
    eprint!("{}", format_error(err, caps.supports_color, caps.supports_unicode));
}
