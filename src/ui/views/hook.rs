use stagehand::infrastructure::git::HookInstall;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;

pub fn render_hook_installed(install: &HookInstall, supports_color: bool, supports_unicode: bool) -> String {
    let title = if install.replaced {
        "Post-commit hook replaced"
    } else {
        "Post-commit hook installed"
    };
    let mut header = CommandHeader::new(Icon::Hook, title);
    header.add("Hook", install.path.display().to_string());
    header.add("Opt out", "SKIP_DEPLOY=1 git commit ...");
    header.render(supports_color, supports_unicode)
}
