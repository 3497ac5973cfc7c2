use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tool discovery events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlatformEvent {
    /// The tool resolved on the current search path
    ToolResolved { tool: String, path: PathBuf },

    /// The tool was found in a fallback install directory
    PathAugmented { tool: String, directory: PathBuf },

    /// Neither the search path nor any fallback directory had the tool
    ToolMissing { tool: String, candidates: Vec<PathBuf> },
}
