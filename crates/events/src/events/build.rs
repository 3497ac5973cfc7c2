use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Build step events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildEvent {
    /// A step was spawned
    StepStarted { description: String, command: String },

    /// One line of live output (verbose mode only)
    StepOutput { description: String, line: String },

    /// Full captured output of a failed, non-verbose step, emitted once
    StepOutputReplay { description: String, output: String },

    /// Step exited with code 0
    StepCompleted {
        description: String,
        exit_code: i32,
        duration: Duration,
    },

    /// Step exited non-zero (or was killed)
    StepFailed {
        description: String,
        exit_code: i32,
        duration: Duration,
    },

    /// Native build output was copied into the staging directory
    OutputStaged { source: PathBuf, staging: PathBuf },

    /// Output directory now holds the new build
    OutputReplaced { source: PathBuf, destination: PathBuf },

    /// Output directory was deleted (or was already absent)
    OutputRemoved { path: PathBuf, existed: bool },
}
