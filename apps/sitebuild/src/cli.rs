//! Command line interface definition

use clap::{Parser, Subcommand, ValueEnum};
use sitebuild_config::ColorChoice;
use sitebuild_platform::ShellKind;
use std::path::PathBuf;

/// sitebuild - build, clean, install and serve a static website
#[derive(Parser)]
#[command(name = "sitebuild")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build, clean, install and serve a static website through npm")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Stream tool output as it is produced
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging to the cache directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the website project
    #[arg(long, global = true, value_name = "DIR")]
    pub project_root: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check and build the site, then move the result into OUTPUT_DIR
    Build {
        /// Destination for the built site (created if missing)
        output_dir: PathBuf,
    },

    /// Remove a previously built output directory
    Clean {
        /// Output directory to delete
        output_dir: PathBuf,
    },

    /// Install the project's npm dependencies
    Install,

    /// Run the development server in the foreground
    Dev,

    /// Print shell statements that make npm reachable
    Activate {
        /// Shell dialect to print
        #[arg(long, value_enum)]
        shell: Option<ShellArg>,
    },
}

/// Shells `activate` can print for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellArg {
    Posix,
    Powershell,
    Cmd,
}

impl From<ShellArg> for ShellKind {
    fn from(shell: ShellArg) -> Self {
        match shell {
            ShellArg::Posix => ShellKind::Posix,
            ShellArg::Powershell => ShellKind::PowerShell,
            ShellArg::Cmd => ShellKind::Cmd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_requires_output_dir() {
        assert!(Cli::try_parse_from(["sitebuild", "build"]).is_err());
        let cli = Cli::try_parse_from(["sitebuild", "build", "public", "-v"]).unwrap();
        assert!(cli.global.verbose);
        assert!(matches!(
            cli.command,
            Commands::Build { output_dir } if output_dir == PathBuf::from("public")
        ));
    }

    #[test]
    fn test_color_flag_parses() {
        let cli = Cli::try_parse_from(["sitebuild", "--color", "never", "install"]).unwrap();
        assert_eq!(cli.global.color, Some(ColorChoice::Never));
        assert!(Cli::try_parse_from(["sitebuild", "--color", "sometimes", "install"]).is_err());
    }
}
