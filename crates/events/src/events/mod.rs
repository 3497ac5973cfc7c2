use serde::{Deserialize, Serialize};

pub mod build;
pub mod general;
pub mod platform;

pub use build::*;
pub use general::*;
pub use platform::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, notices, operations)
    General(GeneralEvent),

    /// Build step events (step lifecycle, captured output, output swap)
    Build(BuildEvent),

    /// Platform events (tool discovery, PATH augmentation)
    Platform(PlatformEvent),
}
