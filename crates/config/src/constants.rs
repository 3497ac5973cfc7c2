//! Fixed names shared by the CLI and the builder
//!
//! These are deliberately not exposed via TOML configuration.

/// Config file looked up in the current directory when `--config` is absent
pub const CONFIG_FILE_NAME: &str = "sitebuild.toml";

/// Suffix of the sibling directory the new build is staged into
pub const STAGING_SUFFIX: &str = ".tmp";

/// Suffix the previous output directory is parked under during the swap
pub const BACKUP_SUFFIX: &str = ".old";

/// Sub-directory of the user's cache dir that receives debug logs
pub const LOGS_SUBDIR: &str = "sitebuild/logs";

pub const ENV_PROJECT_ROOT: &str = "SITEBUILD_PROJECT_ROOT";
pub const ENV_DIST_DIR: &str = "SITEBUILD_DIST_DIR";
pub const ENV_TOOL: &str = "SITEBUILD_TOOL";
pub const ENV_VERBOSE: &str = "SITEBUILD_VERBOSE";
pub const ENV_COLOR: &str = "SITEBUILD_COLOR";
