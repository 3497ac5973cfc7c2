//! Platform layer for sitebuild.
//!
//! This crate provides the operations the build orchestrator relies on:
//! - Process execution through the system shell with line-by-line output
//! - Filesystem helpers for staging and swapping directory trees
//! - Tool discovery and explicit PATH augmentation

pub mod env;
pub mod fs;
pub mod process;

pub use env::{EnvAction, ShellKind, ToolEnvironment, ToolLocator};
pub use process::{ProcessRunner, ShellCommand, ShellRunner};
