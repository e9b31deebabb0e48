use std::path::PathBuf;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::panel::{Panel, PanelStyle};

#[derive(Debug, Clone)]
pub struct ErrorBlock {
    title: String,
    message: String,
    paths: Vec<PathBuf>,
    details: Option<String>,
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            paths: Vec::new(),
            details: None,
            fix: None,
        }
    }

    pub fn with_paths(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.paths.extend(paths);
        self
    }

    /// Verbatim tool output, shown under the message
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        let details = details.into();
        if !details.trim().is_empty() {
            self.details = Some(details);
        }
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let title = format!(
            "{} {}",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error(self.title.as_str())
                .bold()
                .render(supports_color)
        );
        let mut panel = Panel::with_title(title).style(PanelStyle::Error);

        panel.add_empty();
        panel.add_line(self.message.clone());

        if !self.paths.is_empty() {
            panel.add_empty();
            for path in &self.paths {
                panel.add_line(format!(
                    "{} {}",
                    Icon::Arrow.colored(supports_color, supports_unicode),
                    path.display()
                ));
            }
        }

        if let Some(details) = &self.details {
            panel.add_empty();
            for line in details.lines() {
                panel.add_line(ColoredText::dim(line).render(supports_color));
            }
        }

        if let Some(fix) = &self.fix {
            panel.add_empty();
            panel.add_line(format!("FIX: {}", fix));
        }

        panel.render(supports_color, supports_unicode)
    }
}
