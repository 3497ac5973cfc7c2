//! Shell-backed process runner

use async_trait::async_trait;
use sitebuild_errors::{Error, PlatformError};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use super::{LineSink, ProcessRunner, ShellCommand};

/// Runs commands through `sh -c` (or `cmd /C` on Windows) with stderr
/// folded into stdout, so lines arrive in the order the tool wrote them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn build_command(cmd: &ShellCommand) -> Command {
        #[cfg(unix)]
        let mut command = {
            let mut c = Command::new("sh");
            c.arg("-c").arg(format!("exec 2>&1\n{}", cmd.command()));
            c
        };

        #[cfg(windows)]
        let mut command = {
            let mut c = Command::new("cmd");
            // cmd.exe parses its own command line; quoting it like argv breaks `"` in steps
            c.arg("/C").raw_arg(format!("({}) 2>&1", cmd.command()));
            c
        };

        if let Some(dir) = cmd.get_current_dir() {
            command.current_dir(dir);
        }
        if let Some(path) = cmd.get_search_path() {
            command.env("PATH", path);
        }

        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

fn execution_failed(cmd: &ShellCommand, err: &std::io::Error) -> Error {
    PlatformError::ProcessExecutionFailed {
        command: cmd.command().to_string(),
        message: err.to_string(),
    }
    .into()
}

fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

#[async_trait]
impl ProcessRunner for ShellRunner {
    async fn run(
        &self,
        cmd: &ShellCommand,
        on_line: &mut LineSink<'_>,
    ) -> Result<Option<i32>, Error> {
        tracing::debug!(command = cmd.command(), cwd = ?cmd.get_current_dir(), "spawning step");

        let mut child = Self::build_command(cmd)
            .spawn()
            .map_err(|e| execution_failed(cmd, &e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::internal("child stdout was not captured"))?;
        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| execution_failed(cmd, &e))?;
            if read == 0 {
                break;
            }
            on_line(&String::from_utf8_lossy(trim_line_ending(&buf)));
        }

        // stderr was redirected by the shell; drain whatever the shell itself
        // wrote before the redirect took effect.
        let mut stderr_lines = Vec::new();
        if let Some(stderr) = child.stderr.take() {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                stderr_lines.push(line);
            }
        }
        for line in &stderr_lines {
            on_line(line);
        }

        let status = child.wait().await.map_err(|e| execution_failed(cmd, &e))?;
        tracing::debug!(command = cmd.command(), code = ?status.code(), "step exited");
        Ok(status.code())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    async fn run_collect(command: &str) -> (Option<i32>, Vec<String>) {
        let mut lines = Vec::new();
        let code = ShellRunner::new()
            .run(&ShellCommand::new(command), &mut |line: &str| {
                lines.push(line.to_string());
            })
            .await
            .unwrap();
        (code, lines)
    }

    #[tokio::test]
    async fn test_interleaves_stdout_and_stderr_in_order() {
        let (code, lines) = run_collect("echo one; echo two >&2; echo three").await;
        assert_eq!(code, Some(0));
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_reports_exit_code() {
        let (code, lines) = run_collect("echo failing; exit 3").await;
        assert_eq!(code, Some(3));
        assert_eq!(lines, vec!["failing"]);
    }

    #[tokio::test]
    async fn test_last_line_without_newline_is_kept() {
        let (_, lines) = run_collect("printf 'a\\nb'").await;
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_runs_in_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        let mut cmd = ShellCommand::new("pwd -P");
        cmd.current_dir(&canonical);

        let mut lines = Vec::new();
        ShellRunner::new()
            .run(&cmd, &mut |line: &str| lines.push(line.to_string()))
            .await
            .unwrap();
        assert_eq!(lines, vec![canonical.display().to_string()]);
    }
}
