//! Runs one build step and reports it

use crate::context::BuildContext;
use crate::step::{BuildStep, CapturedOutput, StepOutcome};
use sitebuild_errors::Error;
use sitebuild_events::{AppEvent, BuildEvent, EventEmitter};
use sitebuild_platform::{ProcessRunner, ShellCommand};
use std::time::Instant;

/// Executes build steps inside a [`BuildContext`]
pub struct StepExecutor<'a> {
    runner: &'a dyn ProcessRunner,
    context: &'a BuildContext,
}

impl<'a> StepExecutor<'a> {
    #[must_use]
    pub fn new(runner: &'a dyn ProcessRunner, context: &'a BuildContext) -> Self {
        Self { runner, context }
    }

    /// Run `step` in the project root and wait for it to exit
    ///
    /// With `verbose` every output line is emitted as it arrives. Otherwise
    /// output is captured and replayed once, in full, only if the step fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the step cannot be spawned. A step that runs and
    /// exits non-zero is not an error; its code is in the outcome.
    pub async fn execute(&self, verbose: bool, step: &BuildStep) -> Result<StepOutcome, Error> {
        let mut command = ShellCommand::new(step.command.clone());
        command
            .current_dir(self.context.project_root())
            .search_path(self.context.tool_env().path_var()?);

        self.context
            .emit_step_started(step.description.clone(), step.command.clone());

        self.context.emit_debug(format!(
            "running `{}` in {}",
            step.command,
            self.context.project_root().display()
        ));

        let started = Instant::now();
        let mut captured = CapturedOutput::default();
        let context = self.context;
        let description = step.description.as_str();
        let result = {
            let mut on_line = |line: &str| {
                captured.push(line);
                if verbose {
                    context.emit(AppEvent::Build(BuildEvent::StepOutput {
                        description: description.to_string(),
                        line: line.to_string(),
                    }));
                }
            };
            self.runner.run(&command, &mut on_line).await
        };
        let duration = started.elapsed();

        let code = match result {
            Ok(code) => code,
            Err(err) => {
                tracing::error!(
                    step = %step.description,
                    command = %step.command,
                    error = %err,
                    "step failed to start"
                );
                self.context
                    .emit_step_finished(step.description.clone(), -1, duration);
                return Err(err);
            }
        };

        let exit_code = code.unwrap_or(-1);
        tracing::debug!(step = %step.description, exit_code, ?duration, "step finished");

        if exit_code != 0 && !verbose && !captured.is_empty() {
            self.context
                .emit(AppEvent::Build(BuildEvent::StepOutputReplay {
                    description: step.description.clone(),
                    output: captured.into_text(),
                }));
        }
        self.context
            .emit_step_finished(step.description.clone(), exit_code, duration);

        Ok(StepOutcome {
            description: step.description.clone(),
            exit_code,
            duration,
        })
    }
}
