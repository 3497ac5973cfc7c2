//! Build orchestration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("build output missing after a successful build step: {path}")]
    MissingBuildOutput { path: String },

    #[error("project root not found: {path}")]
    ProjectRootNotFound { path: String },

    #[error("output directory swap failed for {path}: {message}")]
    OutputSwapFailed { path: String, message: String },

    #[error("invalid output directory: {path} - {reason}")]
    InvalidOutputDir { path: String, reason: String },
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingBuildOutput { .. } => Some(
                "The build step reported success without producing its output directory; check the project's build script.",
            ),
            Self::ProjectRootNotFound { .. } => {
                Some("Pass --project-root or set [project].root in sitebuild.toml.")
            }
            Self::OutputSwapFailed { .. } => {
                Some("The previous output directory was kept; fix the filesystem issue and rebuild.")
            }
            Self::InvalidOutputDir { .. } => {
                Some("Choose an output directory outside of the project's build output.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::MissingBuildOutput { .. } => "build.missing_build_output",
            Self::ProjectRootNotFound { .. } => "build.project_root_not_found",
            Self::OutputSwapFailed { .. } => "build.output_swap_failed",
            Self::InvalidOutputDir { .. } => "build.invalid_output_dir",
        };
        Some(code)
    }
}
