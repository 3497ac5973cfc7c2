//! Event handling and progress display

use console::{Style, Term};
use sitebuild_events::{AppEvent, BuildEvent, GeneralEvent, PlatformEvent};

/// Renders orchestrator events in the "Checking...DONE! (0)" shape
pub struct EventHandler {
    term: Term,
    colors: bool,
    verbose: bool,
    /// A step description was printed and its result has not been yet
    line_open: bool,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(colors_enabled: bool, verbose: bool) -> Self {
        Self {
            term: Term::stdout(),
            colors: colors_enabled,
            verbose,
            line_open: false,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        if let Some(text) = self.render(event) {
            if let Err(e) = self.term.write_str(&text) {
                tracing::debug!("failed to write to terminal: {e}");
            }
        }
    }

    /// Turn an event into the text to print, if any
    pub fn render(&mut self, event: AppEvent) -> Option<String> {
        match event {
            AppEvent::General(event) => self.render_general(event),
            AppEvent::Build(event) => self.render_build(event),
            AppEvent::Platform(event) => self.render_platform(&event),
        }
    }

    fn render_general(&mut self, event: GeneralEvent) -> Option<String> {
        match event {
            GeneralEvent::Notice { message } => {
                let mut text = self.close_line();
                text.push_str(&message);
                if !message.ends_with('\n') {
                    text.push('\n');
                }
                Some(text)
            }
            GeneralEvent::Warning { message } => {
                let mut text = self.close_line();
                let line = format!("Warning: {message}");
                text.push_str(&self.paint(&Style::new().yellow(), &line));
                text.push('\n');
                Some(text)
            }
            GeneralEvent::DebugLog { message, .. } => {
                tracing::debug!("{message}");
                None
            }
            GeneralEvent::OperationStarted { operation } => {
                tracing::info!(%operation, "operation started");
                None
            }
            GeneralEvent::OperationCompleted { exit_code, .. } => {
                let mut text = self.close_line();
                text.push_str("\nResults: ");
                text.push_str(&self.done(exit_code));
                text.push('\n');
                Some(text)
            }
        }
    }

    fn render_build(&mut self, event: BuildEvent) -> Option<String> {
        match event {
            BuildEvent::StepStarted {
                description,
                command,
            } => {
                tracing::debug!(%description, %command, "step started");
                let mut text = self.close_line();
                text.push_str(&description);
                self.line_open = true;
                Some(text)
            }
            BuildEvent::StepOutput { line, .. } => {
                let mut text = self.close_line();
                text.push_str(&format!("    {line}\n"));
                Some(text)
            }
            BuildEvent::StepOutputReplay { output, .. } => {
                let mut text = self.close_line();
                for line in output.lines() {
                    text.push_str(&format!("    {line}\n"));
                }
                Some(text)
            }
            BuildEvent::StepCompleted { exit_code, .. }
            | BuildEvent::StepFailed { exit_code, .. } => {
                let mut text = if self.line_open {
                    String::new()
                } else {
                    "    ".to_string()
                };
                self.line_open = false;
                text.push_str(&self.done(exit_code));
                text.push('\n');
                Some(text)
            }
            BuildEvent::OutputStaged { source, staging } => {
                tracing::debug!(
                    source = %source.display(),
                    staging = %staging.display(),
                    "output staged"
                );
                None
            }
            BuildEvent::OutputReplaced {
                source,
                destination,
            } => {
                tracing::info!(
                    source = %source.display(),
                    destination = %destination.display(),
                    "output replaced"
                );
                None
            }
            BuildEvent::OutputRemoved { path, existed } => {
                tracing::info!(path = %path.display(), existed, "output removed");
                None
            }
        }
    }

    fn render_platform(&mut self, event: &PlatformEvent) -> Option<String> {
        match event {
            PlatformEvent::ToolResolved { tool, path } => {
                tracing::debug!(%tool, path = %path.display(), "tool resolved");
                None
            }
            PlatformEvent::PathAugmented { tool, directory } => {
                if !self.verbose {
                    return None;
                }
                let mut text = self.close_line();
                text.push_str(&format!("Using {tool} from {}\n", directory.display()));
                Some(text)
            }
            PlatformEvent::ToolMissing { tool, candidates } => {
                tracing::warn!(%tool, ?candidates, "tool missing");
                None
            }
        }
    }

    /// Newline to finish a pending step description, if one is open
    fn close_line(&mut self) -> String {
        if self.line_open {
            self.line_open = false;
            "\n".to_string()
        } else {
            String::new()
        }
    }

    fn done(&self, exit_code: i32) -> String {
        let text = format!("DONE! ({exit_code})");
        let style = if exit_code == 0 {
            Style::new().green()
        } else {
            Style::new().red().bold()
        };
        self.paint(&style, &text)
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        if self.colors {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn render_all(handler: &mut EventHandler, events: Vec<AppEvent>) -> String {
        events
            .into_iter()
            .filter_map(|event| handler.render(event))
            .collect()
    }

    fn started(description: &str) -> AppEvent {
        AppEvent::Build(BuildEvent::StepStarted {
            description: description.to_string(),
            command: "npm run check".to_string(),
        })
    }

    fn finished(description: &str, exit_code: i32) -> AppEvent {
        let description = description.to_string();
        let duration = Duration::from_millis(5);
        AppEvent::Build(if exit_code == 0 {
            BuildEvent::StepCompleted {
                description,
                exit_code,
                duration,
            }
        } else {
            BuildEvent::StepFailed {
                description,
                exit_code,
                duration,
            }
        })
    }

    #[test]
    fn test_quiet_success_renders_on_one_line() {
        let mut handler = EventHandler::new(false, false);
        let text = render_all(
            &mut handler,
            vec![
                started("Checking..."),
                finished("Checking...", 0),
                AppEvent::General(GeneralEvent::OperationCompleted {
                    operation: "build".to_string(),
                    exit_code: 0,
                }),
            ],
        );
        assert_eq!(text, "Checking...DONE! (0)\n\nResults: DONE! (0)\n");
    }

    #[test]
    fn test_replayed_output_appears_before_result() {
        let mut handler = EventHandler::new(false, false);
        let text = render_all(
            &mut handler,
            vec![
                started("Checking..."),
                AppEvent::Build(BuildEvent::StepOutputReplay {
                    description: "Checking...".to_string(),
                    output: "first\nsecond\n".to_string(),
                }),
                finished("Checking...", 2),
            ],
        );
        assert_eq!(text, "Checking...\n    first\n    second\n    DONE! (2)\n");
    }

    #[test]
    fn test_notice_closes_open_line() {
        let mut handler = EventHandler::new(false, false);
        let text = render_all(
            &mut handler,
            vec![
                started("Serving..."),
                AppEvent::General(GeneralEvent::Notice {
                    message: "hello".to_string(),
                }),
            ],
        );
        assert_eq!(text, "Serving...\nhello\n");
    }
}
