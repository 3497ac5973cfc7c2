#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]
//! Build orchestration for sitebuild
//!
//! This crate runs the package tool's verbs as ordered steps, captures their
//! output, and swaps the tool's build output into the requested directory.

mod context;
mod executor;
mod orchestrator;
mod step;

pub use context::BuildContext;
pub use executor::StepExecutor;
pub use orchestrator::{BuildOrchestrator, dev_banner, OperationReport, Verb};
pub use step::{BuildStep, CapturedOutput, StepOutcome};
