use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// General utility events for warnings, notices and operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeneralEvent {
    /// Something the user should know about that did not stop the operation
    Warning { message: String },

    /// Debug logging with structured context
    DebugLog {
        message: String,
        context: HashMap<String, String>,
    },

    /// Plain status text meant for the user, e.g. the dev server banner
    Notice { message: String },

    /// Operation started (`build`, `clean`, `install`, `dev`)
    OperationStarted { operation: String },

    /// Operation finished; `exit_code` is 0 on success
    OperationCompleted { operation: String, exit_code: i32 },
}

impl GeneralEvent {
    /// Create a warning event
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    /// Create a debug log event
    #[must_use]
    pub fn debug(message: impl Into<String>) -> Self {
        Self::DebugLog {
            message: message.into(),
            context: HashMap::new(),
        }
    }
}
