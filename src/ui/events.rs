//! Console Event Sink
//!
//! Human-readable progress lines on stderr. Detail follows `-v`.

use std::io::{self, Write};
use std::sync::Mutex;

use stagehand::domain::ports::{DeployEvent, DeployEventSink};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::deploy::render_plan_line;
use crate::ui::views::trigger::{render_countdown, render_scheduled};

pub struct ConsoleEventSink {
    ui: UiContext,
    state: Mutex<SinkState>,
}

struct SinkState {
    writer: Box<dyn Write + Send>,
    /// A countdown line is open and must be ended before the next line
    counting: bool,
}

impl ConsoleEventSink {
    pub fn stderr(ui: UiContext) -> Self {
        Self::with_writer(ui, io::stderr())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: UiContext, writer: W) -> Self {
        Self {
            ui,
            state: Mutex::new(SinkState {
                writer: Box::new(writer),
                counting: false,
            }),
        }
    }

    fn line(&self, icon: Icon, text: impl AsRef<str>) -> String {
        format!(
            "{} {}\n",
            icon.colored(self.ui.color, self.ui.unicode),
            text.as_ref()
        )
    }

    /// Text for an event, or `None` when it prints nothing at this verbosity
    fn render(&self, event: &DeployEvent) -> Option<String> {
        let (color, unicode, verbose) = (self.ui.color, self.ui.unicode, self.ui.verbose);

        match event {
            DeployEvent::Resolved { files, config, scope } => {
                let config = if *config { " + config" } else { "" };
                let scope = scope.map(|s| s.to_string()).unwrap_or_default();
                Some(self.line(
                    Icon::Progress,
                    format!(
                        "Resolved {files} files{config} {}",
                        ColoredText::dim(format!("({scope})")).render(color)
                    ),
                ))
            }
            DeployEvent::Warning { path, message } => Some(self.line(
                Icon::Warning,
                ColoredText::warning(format!("{}: {}", path.display(), message)).render(color),
            )),
            DeployEvent::ConfigChecked { service, passed } => Some(if *passed {
                self.line(Icon::Success, format!("{service} accepts the candidate config"))
            } else {
                self.line(Icon::Error, format!("{service} rejected the candidate config"))
            }),
            DeployEvent::Staged { count, staging_dir } if verbose > 0 => Some(self.line(
                Icon::Progress,
                format!("Staged {count} files in {}", staging_dir.display()),
            )),
            DeployEvent::Planned {
                index,
                action,
                dest,
                ..
            } => {
                let heading = if *index == 0 {
                    self.line(Icon::Arrow, "Plan")
                } else {
                    String::new()
                };
                Some(format!("{heading}{}\n", render_plan_line(*action, dest, color)))
            }
            DeployEvent::FileCommitted { path, .. } => {
                Some(self.line(Icon::Success, format!("wrote {}", path.display())))
            }
            DeployEvent::RolledBack {
                restored,
                unrestored,
            } => Some(self.line(
                Icon::Rollback,
                ColoredText::warning(format!(
                    "Rolled back: {restored} restored, {unrestored} not restored"
                ))
                .render(color),
            )),
            DeployEvent::ServiceChecked { service, passed } => Some(if *passed {
                self.line(Icon::Success, format!("{service} accepts the live config"))
            } else {
                self.line(Icon::Error, format!("{service} rejected the live config"))
            }),
            DeployEvent::Reloaded { service } => {
                Some(self.line(Icon::Success, format!("{service} reloaded")))
            }
            DeployEvent::Scheduled { scope, delay_secs } => Some(render_scheduled(
                *scope,
                *delay_secs,
                self.ui.interactive(),
                color,
                unicode,
            )),
            _ => None,
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        if let DeployEvent::Countdown { remaining_secs } = event {
            // Ticks only make sense when the line can be redrawn.
            if self.ui.caps.is_tty {
                let tick = render_countdown(remaining_secs, self.ui.color, self.ui.unicode);
                let _ = write!(state.writer, "\r{tick}");
                let _ = state.writer.flush();
                state.counting = true;
            }
            return;
        }

        let Some(text) = self.render(&event) else {
            return;
        };
        if state.counting {
            let _ = writeln!(state.writer);
            state.counting = false;
        }
        let _ = state.writer.write_all(text.as_bytes());
        let _ = state.writer.flush();
    }

    fn wants_detailed_events(&self) -> bool {
        self.ui.verbose > 0
    }
}
