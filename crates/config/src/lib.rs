#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for sitebuild
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (`sitebuild.toml`)
//! - Environment variables (`SITEBUILD_*`)
//! - CLI flags (applied by the binary)

pub mod constants;
pub mod core;

pub use crate::core::{ColorChoice, GeneralConfig, ProjectConfig, StepsConfig, ToolConfig};

use serde::{Deserialize, Serialize};
use sitebuild_errors::{ConfigError, Error};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub tool: ToolConfig,

    #[serde(default)]
    pub steps: StepsConfig,

    /// Directory of the file this config was read from
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, an I/O
    /// error carrying the path if it cannot be read, and
    /// `ConfigError::ParseError` if it is not valid TOML.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::from(ConfigError::NotFound {
                    path: path.display().to_string(),
                })
            } else {
                Error::io_with_path(&e, path)
            }
        })?;

        let mut config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        // `sitebuild.toml` has an empty parent; anchor it before taking the directory
        let absolute = std::path::absolute(path).map_err(|e| Error::io_with_path(&e, path))?;
        config.base_dir = absolute.parent().map(Path::to_path_buf);
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `sitebuild.toml` from `dir` if present, defaults otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub async fn load_from_dir(dir: &Path) -> Result<Self, Error> {
        let candidate = dir.join(constants::CONFIG_FILE_NAME);
        if fs::try_exists(&candidate).await.unwrap_or(false) {
            Self::load_from_file(&candidate).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// If path is provided, loads from that file.
    /// If path is None, looks for `sitebuild.toml` in the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => {
                let cwd = std::env::current_dir()?;
                Self::load_from_dir(&cwd).await
            }
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Merge overrides from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds a value of the wrong shape.
    pub fn merge_env_with<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(constants::ENV_PROJECT_ROOT) {
            self.project.root = Some(PathBuf::from(root));
        }

        if let Some(dist) = lookup(constants::ENV_DIST_DIR) {
            self.project.dist_dir = PathBuf::from(dist);
        }

        if let Some(tool) = lookup(constants::ENV_TOOL) {
            if tool.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: constants::ENV_TOOL.to_string(),
                    value: tool,
                }
                .into());
            }
            self.tool.program = tool;
        }

        if let Some(verbose) = lookup(constants::ENV_VERBOSE) {
            self.general.verbose = match verbose.as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: constants::ENV_VERBOSE.to_string(),
                        value: verbose,
                    }
                    .into())
                }
            };
        }

        if let Some(color) = lookup(constants::ENV_COLOR) {
            self.general.color = color.parse().map_err(|value| ConfigError::InvalidValue {
                field: constants::ENV_COLOR.to_string(),
                value,
            })?;
        }

        Ok(())
    }

    /// Reject step tables with blank commands
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyCommand` naming the first blank step.
    pub fn validate(&self) -> Result<(), Error> {
        let steps = [
            ("check", &self.steps.check),
            ("build", &self.steps.build),
            ("install", &self.steps.install),
            ("dev", &self.steps.dev),
        ];
        for (step, command) in steps {
            if command.trim().is_empty() {
                return Err(ConfigError::EmptyCommand {
                    step: step.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Resolve the project root
    ///
    /// Relative roots are resolved against the config file's directory, or
    /// the current directory when no file was loaded.
    #[must_use]
    pub fn project_root(&self) -> PathBuf {
        let base = self
            .base_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        match &self.project.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => base.join(root),
            None => base,
        }
    }

    /// Absolute location of the tool's native build output
    #[must_use]
    pub fn dist_path(&self) -> PathBuf {
        self.project_root().join(&self.project.dist_dir)
    }
}

/// Directory debug logs are written to
#[must_use]
pub fn logs_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(constants::LOGS_SUBDIR)
}
