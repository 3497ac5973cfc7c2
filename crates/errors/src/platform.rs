//! Platform operation errors: tool discovery and process execution

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Errors that can occur during platform-specific operations
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum PlatformError {
    #[error("{tool} was not found in the environment; please install {tool} before running sitebuild")]
    ToolNotFound { tool: String },

    #[error("process execution failed: {command} - {message}")]
    ProcessExecutionFailed { command: String, message: String },
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ToolNotFound { .. } => Some(
                "Install Node.js (which ships npm) or set [tool].program in sitebuild.toml.",
            ),
            Self::ProcessExecutionFailed { .. } => {
                Some("Make sure a system shell is available to run build steps.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ToolNotFound { .. } => "platform.tool_not_found",
            Self::ProcessExecutionFailed { .. } => "platform.process_execution_failed",
        };
        Some(code)
    }
}
