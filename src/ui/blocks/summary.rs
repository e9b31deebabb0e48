use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::panel::{Panel, PanelStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryTone {
    Success,
    Notice,
    Failure,
}

#[derive(Debug, Clone)]
pub struct ResultSummary {
    title: String,
    tone: SummaryTone,
    stats: Vec<(String, String)>,
    warnings: Vec<String>,
    next_step: Option<String>,
}

impl ResultSummary {
    pub fn new(title: impl Into<String>, tone: SummaryTone) -> Self {
        Self {
            title: title.into(),
            tone,
            stats: Vec::new(),
            warnings: Vec::new(),
            next_step: None,
        }
    }

    pub fn add_stat(&mut self, label: impl Into<String>, value: impl ToString) {
        self.stats.push((label.into(), value.to_string()));
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn with_next_step(&mut self, hint: impl Into<String>) {
        self.next_step = Some(hint.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let (style, icon, title) = match self.tone {
            SummaryTone::Success => (
                PanelStyle::Success,
                Icon::Success,
                ColoredText::success(self.title.as_str()),
            ),
            SummaryTone::Notice => (
                PanelStyle::Info,
                Icon::Progress,
                ColoredText::info(self.title.as_str()),
            ),
            SummaryTone::Failure => (
                PanelStyle::Error,
                Icon::Error,
                ColoredText::error(self.title.as_str()),
            ),
        };

        let header = format!(
            "{} {}",
            icon.colored(supports_color, supports_unicode),
            title.bold().render(supports_color)
        );
        let mut panel = Panel::with_title(header).style(style);

        if !self.stats.is_empty() {
            panel.add_empty();
            let width = self.stats.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
            for (label, value) in &self.stats {
                panel.add_line(format!("{label:<width$}  {value}"));
            }
        }

        if !self.warnings.is_empty() {
            panel.add_empty();
            for warning in &self.warnings {
                panel.add_line(format!(
                    "{} {}",
                    Icon::Warning.colored(supports_color, supports_unicode),
                    warning
                ));
            }
        }

        if let Some(next_step) = &self.next_step {
            panel.add_empty();
            panel.add_line(format!(
                "{} {} {}",
                Icon::Arrow.colored(supports_color, supports_unicode),
                ColoredText::dim("Next:").render(supports_color),
                next_step
            ));
        }

        panel.render(supports_color, supports_unicode)
    }
}
