//! Interactive plan confirmation

use dialoguer::Confirm;

use stagehand::domain::ports::{ConfirmDecision, PlanConfirmer};
use stagehand::domain::services::DeploymentPlan;

use crate::ui::components::diff::render_config_diff;
use crate::ui::context::UiContext;
use crate::ui::theme::prompt_theme;
use crate::ui::views::deploy::plan_tally;

/// Asks on the terminal; `Unavailable` when nobody is there to answer
pub struct PromptConfirmer {
    ui: UiContext,
}

impl PromptConfirmer {
    pub fn new(ui: UiContext) -> Self {
        Self { ui }
    }
}

impl PlanConfirmer for PromptConfirmer {
    fn confirm(&self, plan: &DeploymentPlan) -> ConfirmDecision {
        if !self.ui.interactive() {
            return ConfirmDecision::Unavailable;
        }

        if self.ui.verbose > 0 {
            if let Some(change) = &plan.config_change {
                eprint!("{}", render_config_diff(change, self.ui.color));
            }
        }

        let theme = prompt_theme(self.ui.color);
        let answer = Confirm::with_theme(theme.as_ref())
            .with_prompt(format!("Apply plan ({})?", plan_tally(plan)))
            .default(false)
            .interact_opt();

        match answer {
            Ok(Some(true)) => ConfirmDecision::Proceed,
            Ok(Some(false)) | Ok(None) => ConfirmDecision::Decline,
            Err(_) => ConfirmDecision::Unavailable,
        }
    }
}
