//! The four operations: build, clean, install and dev

use crate::context::BuildContext;
use crate::executor::StepExecutor;
use crate::step::{BuildStep, StepOutcome};
use serde::Serialize;
use sitebuild_config::constants::{BACKUP_SUFFIX, STAGING_SUFFIX};
use sitebuild_config::StepsConfig;
use sitebuild_errors::{BuildError, Error};
use sitebuild_events::{AppEvent, BuildEvent, EventEmitter};
use sitebuild_platform::{fs, ProcessRunner};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

const DEV_RULE: &str = "--------------------------------------------------------------------------------";

const DEV_NOTE: &str = "Running this command locally is a much better experience; this functionality \
exists\nmostly for documentation purposes to help those unfamiliar with web development to\n\
get up-and-running more quickly.";

/// Text shown before the dev server starts
#[must_use]
pub fn dev_banner(command: &str) -> String {
    format!("\nRunning:\n    {command}\n\n\n{DEV_RULE}\n{DEV_NOTE}\n{DEV_RULE}\n\n")
}

/// Operation requested from the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Build,
    Clean,
    Install,
    Dev,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Build => "build",
            Self::Clean => "clean",
            Self::Install => "install",
            Self::Dev => "dev",
        };
        f.write_str(name)
    }
}

/// What an operation did
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    pub operation: Verb,
    /// 0 on success, otherwise the code of the first failing step
    pub exit_code: i32,
    /// Steps that ran, in order
    pub steps: Vec<StepOutcome>,
    /// Output directory touched by `build` or `clean`
    pub output_dir: Option<PathBuf>,
}

impl OperationReport {
    fn new(operation: Verb) -> Self {
        Self {
            operation,
            exit_code: 0,
            steps: Vec::new(),
            output_dir: None,
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Drives the external tool through a project's build verbs
pub struct BuildOrchestrator {
    context: BuildContext,
    steps: StepsConfig,
    runner: Arc<dyn ProcessRunner>,
}

impl BuildOrchestrator {
    #[must_use]
    pub fn new(context: BuildContext, steps: StepsConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            context,
            steps,
            runner,
        }
    }

    #[must_use]
    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    fn executor(&self) -> StepExecutor<'_> {
        StepExecutor::new(self.runner.as_ref(), &self.context)
    }

    /// Run `steps` in order, stopping at the first required step that fails
    async fn run_sequence(
        &self,
        report: &mut OperationReport,
        verbose: bool,
        steps: &[BuildStep],
    ) -> Result<(), Error> {
        let executor = self.executor();
        for step in steps {
            let outcome = executor.execute(verbose, step).await?;
            let failed = !outcome.success();
            if failed && report.exit_code == 0 {
                report.exit_code = outcome.exit_code;
            }
            report.steps.push(outcome);
            if failed && step.required {
                tracing::debug!(step = %step.description, "required step failed, stopping");
                break;
            }
        }
        Ok(())
    }

    fn finish(&self, report: OperationReport) -> OperationReport {
        self.context
            .emit_operation_completed(report.operation.to_string(), report.exit_code);
        report
    }

    /// Check, build, and move the tool's output into `output_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the project root is missing, `output_dir` lies
    /// inside the tool's own output directory, the build step succeeds
    /// without producing output, or the copy or swap fails. A failing step
    /// is not an error; its code is in the report and `output_dir` is left
    /// untouched.
    pub async fn build(&self, output_dir: &Path) -> Result<OperationReport, Error> {
        self.context.emit_operation_started(Verb::Build.to_string());
        let mut report = OperationReport::new(Verb::Build);

        let project_root = self.context.project_root();
        if !fs::is_dir(project_root).await {
            return Err(BuildError::ProjectRootNotFound {
                path: project_root.display().to_string(),
            }
            .into());
        }

        let output_dir = std::path::absolute(output_dir)?;
        let dist = self.context.dist_path();
        let dist_abs = std::path::absolute(&dist)?;
        if output_dir.starts_with(&dist_abs) || dist_abs.starts_with(&output_dir) {
            return Err(BuildError::InvalidOutputDir {
                path: output_dir.display().to_string(),
                reason: format!("overlaps the build output at {}", dist_abs.display()),
            }
            .into());
        }
        report.output_dir = Some(output_dir.clone());

        let steps = [
            BuildStep::required("Checking...", self.steps.check.clone()),
            BuildStep::required("Building...", self.steps.build.clone()),
        ];
        self.run_sequence(&mut report, self.context.verbose(), &steps)
            .await?;
        if !report.success() {
            return Ok(self.finish(report));
        }

        if !fs::is_dir(&dist).await {
            return Err(BuildError::MissingBuildOutput {
                path: dist.display().to_string(),
            }
            .into());
        }

        let started = Instant::now();
        self.context.emit_step_started(
            "Copying...",
            format!("{} -> {}", dist.display(), output_dir.display()),
        );
        if let Err(err) = self.publish(&dist, &output_dir).await {
            self.context
                .emit_step_finished("Copying...", 1, started.elapsed());
            return Err(err);
        }
        let duration = started.elapsed();
        self.context.emit_step_finished("Copying...", 0, duration);
        report.steps.push(StepOutcome {
            description: "Copying...".to_string(),
            exit_code: 0,
            duration,
        });

        Ok(self.finish(report))
    }

    /// Stage `dist` next to `output_dir`, drop `dist`, then swap
    async fn publish(&self, dist: &Path, output_dir: &Path) -> Result<(), Error> {
        let staging = fs::with_suffix(output_dir, STAGING_SUFFIX);
        let backup = fs::with_suffix(output_dir, BACKUP_SUFFIX);

        if fs::remove_dir_all(&staging).await? {
            tracing::warn!(path = %staging.display(), "removed stale staging directory");
            self.context.emit_warning(format!(
                "removed leftover '{}' from an earlier build",
                staging.display()
            ));
        }
        fs::ensure_parent(output_dir).await?;

        if let Err(err) = fs::copy_directory(dist, &staging).await {
            if let Err(cleanup) = fs::remove_dir_all(&staging).await {
                tracing::warn!(
                    path = %staging.display(),
                    error = %cleanup,
                    "failed to remove staging directory"
                );
            }
            return Err(err);
        }
        self.context.emit(AppEvent::Build(BuildEvent::OutputStaged {
            source: dist.to_path_buf(),
            staging: staging.clone(),
        }));

        fs::remove_dir_all(dist).await?;

        fs::replace_directory(&staging, output_dir, &backup)
            .await
            .map_err(|err| BuildError::OutputSwapFailed {
                path: output_dir.display().to_string(),
                message: err.to_string(),
            })?;
        tracing::info!(path = %output_dir.display(), "output directory replaced");
        self.context
            .emit_output_replaced(dist.to_path_buf(), output_dir.to_path_buf());
        Ok(())
    }

    /// Delete `output_dir`; a missing directory is fine
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists and cannot be removed.
    pub async fn clean(&self, output_dir: &Path) -> Result<OperationReport, Error> {
        self.context.emit_operation_started(Verb::Clean.to_string());
        let mut report = OperationReport::new(Verb::Clean);

        let existed = fs::remove_dir_all(output_dir).await?;
        self.context.emit(AppEvent::Build(BuildEvent::OutputRemoved {
            path: output_dir.to_path_buf(),
            existed,
        }));
        self.context
            .emit_notice(format!("'{}' has been removed.", output_dir.display()));
        report.output_dir = Some(output_dir.to_path_buf());

        Ok(self.finish(report))
    }

    /// Install the project's dependencies
    ///
    /// # Errors
    ///
    /// Returns an error only if the step cannot be spawned.
    pub async fn install(&self) -> Result<OperationReport, Error> {
        self.context.emit_operation_started(Verb::Install.to_string());
        let mut report = OperationReport::new(Verb::Install);
        let step = BuildStep::optional("Installing...", self.steps.install.clone());
        self.run_sequence(&mut report, self.context.verbose(), &[step])
            .await?;
        Ok(self.finish(report))
    }

    /// Run the development server in the foreground, always verbose
    ///
    /// # Errors
    ///
    /// Returns an error only if the step cannot be spawned.
    pub async fn dev(&self) -> Result<OperationReport, Error> {
        self.context.emit_operation_started(Verb::Dev.to_string());
        let mut report = OperationReport::new(Verb::Dev);
        self.context.emit_notice(dev_banner(&self.steps.dev));
        let step = BuildStep::required("Serving...", self.steps.dev.clone());
        self.run_sequence(&mut report, true, &[step]).await?;
        Ok(self.finish(report))
    }
}
