//! Process execution operations

mod shell;

pub use shell::ShellRunner;

use async_trait::async_trait;
use sitebuild_errors::Error;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A shell command line plus the context it runs in
#[derive(Debug, Clone)]
pub struct ShellCommand {
    command: String,
    current_dir: Option<PathBuf>,
    search_path: Option<OsString>,
}

impl ShellCommand {
    /// Create a new shell command
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            current_dir: None,
            search_path: None,
        }
    }

    /// Set the working directory for the child
    pub fn current_dir<P: Into<PathBuf>>(&mut self, dir: P) -> &mut Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Replace the child's `PATH`
    pub fn search_path(&mut self, path: OsString) -> &mut Self {
        self.search_path = Some(path);
        self
    }

    /// Get the command line
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Get the working directory
    #[must_use]
    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Get the `PATH` override
    #[must_use]
    pub fn get_search_path(&self) -> Option<&OsString> {
        self.search_path.as_ref()
    }
}

/// Callback receiving each line of combined output as it is produced
pub type LineSink<'a> = dyn FnMut(&str) + Send + 'a;

/// Trait for process execution operations
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `cmd` to completion, handing every output line to `on_line`.
    ///
    /// Returns the exit code, or `None` when the process was terminated by a
    /// signal.
    async fn run(&self, cmd: &ShellCommand, on_line: &mut LineSink<'_>)
        -> Result<Option<i32>, Error>;
}
