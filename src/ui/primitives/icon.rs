use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Arrow,
    Deploy,
    Timer,
    Rollback,
    Hook,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        if supports_unicode {
            match self {
                Icon::Success => theme::icons::SUCCESS,
                Icon::Error => theme::icons::ERROR,
                Icon::Warning => theme::icons::WARNING,
                Icon::Progress => theme::icons::PROGRESS,
                Icon::Arrow => theme::icons::ARROW,
                Icon::Deploy => theme::icons::DEPLOY,
                Icon::Timer => theme::icons::TIMER,
                Icon::Rollback => theme::icons::ROLLBACK,
                Icon::Hook => theme::icons::HOOK,
            }
        } else {
            match self {
                Icon::Success => theme::icons_ascii::SUCCESS,
                Icon::Error => theme::icons_ascii::ERROR,
                Icon::Warning => theme::icons_ascii::WARNING,
                Icon::Progress => theme::icons_ascii::PROGRESS,
                Icon::Arrow => theme::icons_ascii::ARROW,
                Icon::Deploy => theme::icons_ascii::DEPLOY,
                Icon::Timer => theme::icons_ascii::TIMER,
                Icon::Rollback => theme::icons_ascii::ROLLBACK,
                Icon::Hook => theme::icons_ascii::HOOK,
            }
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Progress | Icon::Rollback => theme::colors::WARNING,
            Icon::Arrow => theme::colors::DIM,
            Icon::Deploy | Icon::Timer | Icon::Hook => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
