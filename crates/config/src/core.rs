//! Configuration sections and their defaults

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// When to colorize terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    #[default]
    Auto,
    Never,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            "never" => Ok(Self::Never),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Always => "always",
            Self::Auto => "auto",
            Self::Never => "never",
        };
        f.write_str(name)
    }
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub color: ColorChoice,
}

/// Location of the website project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project root; relative values resolve against the config file's directory
    pub root: Option<PathBuf>,
    /// Directory the tool writes its build into, relative to the root
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: None,
            dist_dir: default_dist_dir(),
        }
    }
}

/// The external package tool and where to look for it when it is not on PATH
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_program")]
    pub program: String,
    /// Environment variables naming install prefixes, checked in order
    #[serde(default = "default_fallback_env_vars")]
    pub fallback_env_vars: Vec<String>,
    /// Directory under each prefix that holds the tool
    #[serde(default = "default_fallback_subdir")]
    pub fallback_subdir: PathBuf,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            fallback_env_vars: default_fallback_env_vars(),
            fallback_subdir: default_fallback_subdir(),
        }
    }
}

/// Shell commands for each verb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepsConfig {
    #[serde(default = "default_check")]
    pub check: String,
    #[serde(default = "default_build")]
    pub build: String,
    #[serde(default = "default_install")]
    pub install: String,
    #[serde(default = "default_dev")]
    pub dev: String,
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            check: default_check(),
            build: default_build(),
            install: default_install(),
            dev: default_dev(),
        }
    }
}

// Default value functions for serde
fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_program() -> String {
    "npm".to_string()
}

fn default_fallback_env_vars() -> Vec<String> {
    if cfg!(windows) {
        vec!["ProgramFiles".to_string(), "ProgramFiles(x86)".to_string()]
    } else {
        Vec::new()
    }
}

fn default_fallback_subdir() -> PathBuf {
    PathBuf::from("nodejs")
}

fn default_check() -> String {
    "npm run check".to_string()
}

fn default_build() -> String {
    "npm run build".to_string()
}

fn default_install() -> String {
    "npm install".to_string()
}

fn default_dev() -> String {
    "npm run dev".to_string()
}
