use crossterm::style::Stylize;
use similar::{ChangeTag, TextDiff};

use stagehand::domain::services::ConfigChange;

use crate::ui::theme;

/// Lines of unchanged context around each hunk
const CONTEXT: usize = 3;

/// Unified diff of the live config against the staged one, with line numbers
pub fn render_config_diff(change: &ConfigChange, supports_color: bool) -> String {
    let diff = TextDiff::from_lines(&change.old, &change.new);
    let width = change
        .old
        .lines()
        .count()
        .max(change.new.lines().count())
        .max(1)
        .to_string()
        .len();

    let mut out = String::new();
    let dest = change.dest.display();
    for header in [format!("--- {dest} (live)"), format!("+++ {dest} (staged)")] {
        out.push_str(&paint(&header, None, supports_color));
        out.push('\n');
    }

    for (i, group) in diff.grouped_ops(CONTEXT).iter().enumerate() {
        if i > 0 {
            out.push_str(&paint("...", None, supports_color));
            out.push('\n');
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let column = |n: Option<usize>| {
                    n.map(|n| format!("{:>width$}", n + 1))
                        .unwrap_or_else(|| " ".repeat(width))
                };
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                let line = format!(
                    "{} {} {sign} {}",
                    column(change.old_index()),
                    column(change.new_index()),
                    change.value().trim_end_matches('\n')
                );
                out.push_str(&paint(&line, Some(change.tag()), supports_color));
                out.push('\n');
            }
        }
    }

    out
}

fn paint(s: &str, tag: Option<ChangeTag>, supports_color: bool) -> String {
    if !supports_color {
        return s.to_string();
    }
    let color = match tag {
        None => theme::colors::INFO,
        Some(ChangeTag::Delete) => theme::colors::ERROR,
        Some(ChangeTag::Insert) => theme::colors::SUCCESS,
        Some(ChangeTag::Equal) => theme::colors::DIM,
    };
    format!("{}", s.with(color))
}
