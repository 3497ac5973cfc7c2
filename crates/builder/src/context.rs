//! Build context shared by every step of an operation

use sitebuild_config::Config;
use sitebuild_events::{EventEmitter, EventSender};
use sitebuild_platform::ToolEnvironment;
use std::path::{Path, PathBuf};

/// Where the project lives and how its steps are spawned
#[derive(Clone, Debug)]
pub struct BuildContext {
    /// Project root; every step runs with this as its working directory
    project_root: PathBuf,
    /// Tool's native output directory, relative to the project root
    dist_dir: PathBuf,
    /// Search path handed to each step
    tool_env: ToolEnvironment,
    /// Stream step output live instead of replaying it on failure
    verbose: bool,
    /// Event sender for progress reporting
    event_sender: Option<EventSender>,
}

impl EventEmitter for BuildContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl BuildContext {
    /// Create new build context
    #[must_use]
    pub fn new(project_root: PathBuf, tool_env: ToolEnvironment) -> Self {
        Self {
            project_root,
            dist_dir: PathBuf::from("dist"),
            tool_env,
            verbose: false,
            event_sender: None,
        }
    }

    /// Create a context from loaded configuration
    #[must_use]
    pub fn from_config(config: &Config, tool_env: ToolEnvironment) -> Self {
        Self::new(config.project_root(), tool_env)
            .with_dist_dir(config.project.dist_dir.clone())
            .with_verbose(config.general.verbose)
    }

    /// Set the native output directory
    #[must_use]
    pub fn with_dist_dir(mut self, dist_dir: PathBuf) -> Self {
        self.dist_dir = dist_dir;
        self
    }

    /// Set verbose mode
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Absolute path of the tool's native output directory
    #[must_use]
    pub fn dist_path(&self) -> PathBuf {
        self.project_root.join(&self.dist_dir)
    }

    #[must_use]
    pub fn tool_env(&self) -> &ToolEnvironment {
        &self.tool_env
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
