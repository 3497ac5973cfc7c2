#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for sitebuild
//!
//! Library crates never print. Step progress, captured tool output and
//! filesystem milestones travel as [`AppEvent`]s over an unbounded channel
//! and the CLI decides how to render them.

pub mod events;
pub use events::{AppEvent, BuildEvent, GeneralEvent, PlatformEvent};

use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Type alias for event sender using the `AppEvent` system
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for event receiver using the `AppEvent` system
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel with the `AppEvent` system
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout sitebuild
///
/// This trait provides a single, consistent API for emitting events regardless of
/// whether you have a raw `EventSender` or a struct that contains one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::debug(message)));
    }

    /// Emit a warning event
    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning(message)));
    }

    /// Emit a free-form status line
    fn emit_notice(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::Notice {
            message: message.into(),
        }));
    }

    /// Emit an operation started event
    fn emit_operation_started(&self, operation: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationStarted {
            operation: operation.into(),
        }));
    }

    /// Emit an operation completed event
    fn emit_operation_completed(&self, operation: impl Into<String>, exit_code: i32) {
        self.emit(AppEvent::General(GeneralEvent::OperationCompleted {
            operation: operation.into(),
            exit_code,
        }));
    }

    /// Emit a step started event
    fn emit_step_started(&self, description: impl Into<String>, command: impl Into<String>) {
        self.emit(AppEvent::Build(BuildEvent::StepStarted {
            description: description.into(),
            command: command.into(),
        }));
    }

    /// Emit a step finished event, choosing the completed or failed variant
    fn emit_step_finished(
        &self,
        description: impl Into<String>,
        exit_code: i32,
        duration: Duration,
    ) {
        let description = description.into();
        let event = if exit_code == 0 {
            BuildEvent::StepCompleted {
                description,
                exit_code,
                duration,
            }
        } else {
            BuildEvent::StepFailed {
                description,
                exit_code,
                duration,
            }
        };
        self.emit(AppEvent::Build(event));
    }

    /// Emit the final state of an output directory
    fn emit_output_replaced(&self, source: PathBuf, destination: PathBuf) {
        self.emit(AppEvent::Build(BuildEvent::OutputReplaced {
            source,
            destination,
        }));
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
/// This allows `EventSender` to be used directly where `EventEmitter` is expected
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}
