//! Tool discovery and explicit PATH augmentation
//!
//! Nothing in here touches the process environment. Discovery produces a
//! list of [`EnvAction`]s; callers apply them to a [`ToolEnvironment`] value
//! that is handed to every spawned step.

use sitebuild_errors::{Error, PlatformError};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// An environment change produced by tool discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvAction {
    /// Put a directory in front of the search path
    AugmentPath(PathBuf),
}

/// Shell dialects `EnvAction`s can be rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Posix,
    PowerShell,
    Cmd,
}

impl ShellKind {
    /// Dialect of the platform's default shell
    #[must_use]
    pub fn native() -> Self {
        if cfg!(windows) {
            Self::Cmd
        } else {
            Self::Posix
        }
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Posix => "posix",
            Self::PowerShell => "powershell",
            Self::Cmd => "cmd",
        };
        f.write_str(name)
    }
}

impl EnvAction {
    /// Render as a statement the given shell can evaluate
    #[must_use]
    pub fn render(&self, shell: ShellKind) -> String {
        match self {
            Self::AugmentPath(dir) => {
                let dir = dir.display();
                match shell {
                    ShellKind::Posix => format!("export PATH=\"{dir}:$PATH\""),
                    ShellKind::PowerShell => format!("$env:PATH = \"{dir};\" + $env:PATH"),
                    ShellKind::Cmd => format!("set PATH={dir};%PATH%"),
                }
            }
        }
    }
}

/// The search path build steps are spawned with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolEnvironment {
    search_path: Vec<PathBuf>,
}

impl ToolEnvironment {
    /// Snapshot of the current process `PATH`
    #[must_use]
    pub fn from_process() -> Self {
        std::env::var_os("PATH").map_or_else(Self::default, |path| {
            Self::from_paths(std::env::split_paths(&path))
        })
    }

    /// Build from explicit directories, in lookup order
    #[must_use]
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_path: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Apply discovery results; later actions end up in front
    pub fn apply(&mut self, actions: &[EnvAction]) {
        for action in actions {
            match action {
                EnvAction::AugmentPath(dir) => {
                    self.search_path.retain(|existing| existing != dir);
                    self.search_path.insert(0, dir.clone());
                }
            }
        }
    }

    /// Directories in lookup order
    #[must_use]
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Value to hand to a child as `PATH`
    ///
    /// # Errors
    ///
    /// Returns an error if a directory contains the platform's path separator.
    pub fn path_var(&self) -> Result<OsString, Error> {
        std::env::join_paths(&self.search_path)
            .map_err(|e| Error::internal(format!("cannot build PATH: {e}")))
    }

    /// Locate `tool` on this search path
    #[must_use]
    pub fn resolve(&self, tool: &str) -> Option<PathBuf> {
        let path = self.path_var().ok()?;
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        which::which_in(tool, Some(path), cwd).ok()
    }
}

/// Finds the external tool, falling back to known install prefixes
#[derive(Debug, Clone)]
pub struct ToolLocator {
    tool: String,
    fallback_env_vars: Vec<String>,
    fallback_subdir: PathBuf,
}

impl ToolLocator {
    #[must_use]
    pub fn new(
        tool: impl Into<String>,
        fallback_env_vars: Vec<String>,
        fallback_subdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tool: tool.into(),
            fallback_env_vars,
            fallback_subdir: fallback_subdir.into(),
        }
    }

    /// Name of the tool being located
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Candidate install directories, in search order
    #[must_use]
    pub fn candidates<F>(&self, lookup: F) -> Vec<PathBuf>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        self.fallback_env_vars
            .iter()
            .filter_map(|var| lookup(var.as_str()))
            .filter(|prefix| !prefix.is_empty())
            .map(|prefix| Path::new(&prefix).join(&self.fallback_subdir))
            .collect()
    }

    /// Work out which environment changes make the tool reachable
    ///
    /// Returns no actions when the tool already resolves on `env`, one
    /// `AugmentPath` for the first candidate directory that exists, and
    /// `PlatformError::ToolNotFound` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ToolNotFound` when no location has the tool.
    pub fn bootstrap<F>(&self, env: &ToolEnvironment, lookup: F) -> Result<Vec<EnvAction>, Error>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        if let Some(found) = env.resolve(&self.tool) {
            tracing::debug!(tool = %self.tool, path = %found.display(), "tool found on PATH");
            return Ok(Vec::new());
        }

        for candidate in self.candidates(lookup) {
            if candidate.is_dir() {
                tracing::info!(
                    tool = %self.tool,
                    directory = %candidate.display(),
                    "augmenting PATH with fallback install directory"
                );
                return Ok(vec![EnvAction::AugmentPath(candidate)]);
            }
        }

        Err(PlatformError::ToolNotFound {
            tool: self.tool.clone(),
        }
        .into())
    }

    /// [`ToolLocator::bootstrap`] against the real process environment
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ToolNotFound` when no location has the tool.
    pub fn bootstrap_from_process(&self, env: &ToolEnvironment) -> Result<Vec<EnvAction>, Error> {
        self.bootstrap(env, |key| std::env::var_os(key))
    }
}
