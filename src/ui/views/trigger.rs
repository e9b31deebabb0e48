use stagehand::domain::value_objects::DeployScope;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_scheduled(
    scope: Option<DeployScope>,
    delay_secs: u64,
    interactive: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let what = match scope {
        Some(DeployScope::Full) => "assets and config",
        Some(DeployScope::WebOnly) => "assets only",
        Some(DeployScope::ConfigOnly) => "config only",
        None => "nothing",
    };
    let hint = if interactive {
        "Ctrl+C cancels, Enter deploys now"
    } else {
        "Ctrl+C cancels"
    };
    format!(
        "{} Deploying {} in {}s {}\n",
        Icon::Deploy.colored(supports_color, supports_unicode),
        ColoredText::info(what).bold().render(supports_color),
        delay_secs,
        ColoredText::dim(format!("({hint})")).render(supports_color)
    )
}

/// Countdown tick; redrawn in place on a terminal
pub fn render_countdown(remaining_secs: u64, supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "{} {}s ",
        Icon::Timer.colored(supports_color, supports_unicode),
        remaining_secs
    )
}
