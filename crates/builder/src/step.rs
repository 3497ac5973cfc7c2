//! Build steps and what they leave behind

use serde::Serialize;
use std::time::Duration;

/// One invocation of the external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStep {
    /// Shown to the user while the step runs, e.g. "Checking..."
    pub description: String,
    /// Shell command line
    pub command: String,
    /// A failing required step stops the sequence
    pub required: bool,
}

impl BuildStep {
    /// A step whose failure aborts the remaining steps
    #[must_use]
    pub fn required(description: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: command.into(),
            required: true,
        }
    }

    /// A step whose failure is reported but does not stop anything
    #[must_use]
    pub fn optional(description: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: command.into(),
            required: false,
        }
    }
}

/// Combined output of one step, in the order it was produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    lines: Vec<String>,
}

impl CapturedOutput {
    pub fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join back into text, one trailing newline per line
    #[must_use]
    pub fn into_text(self) -> String {
        let mut text = String::new();
        for line in self.lines {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }
}

/// Result of running a single step
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub description: String,
    /// Process exit code; -1 when the process was killed by a signal
    pub exit_code: i32,
    pub duration: Duration,
}

impl StepOutcome {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
