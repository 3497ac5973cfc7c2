//! Integration tests for sitebuild CLI

use std::process::Command;
use tempfile::tempdir;

fn sitebuild() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sitebuild"));
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn test_cli_version() {
    let output = sitebuild()
        .arg("--version")
        .output()
        .expect("Failed to execute sitebuild");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sitebuild"));
}

#[test]
fn test_cli_help() {
    let output = sitebuild()
        .arg("--help")
        .output()
        .expect("Failed to execute sitebuild");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["build", "clean", "install", "dev", "activate"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn test_cli_invalid_command() {
    let output = sitebuild()
        .arg("invalid-command")
        .output()
        .expect("Failed to execute sitebuild");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn test_build_requires_output_dir() {
    let output = sitebuild()
        .arg("build")
        .output()
        .expect("Failed to execute sitebuild");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_clean_missing_directory_succeeds() {
    let temp = tempdir().unwrap();
    let target = temp.path().join("never-built");

    let output = sitebuild()
        .current_dir(temp.path())
        .args(["--color", "never", "clean"])
        .arg(&target)
        .output()
        .expect("Failed to execute sitebuild");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("has been removed."));
    assert!(stdout.contains("Results: DONE! (0)"));
}

#[test]
fn test_clean_removes_directory() {
    let temp = tempdir().unwrap();
    let target = temp.path().join("public");
    std::fs::create_dir_all(target.join("assets")).unwrap();
    std::fs::write(target.join("assets/app.js"), "x").unwrap();

    let output = sitebuild()
        .current_dir(temp.path())
        .arg("clean")
        .arg(&target)
        .output()
        .expect("Failed to execute sitebuild");

    assert!(output.status.success());
    assert!(!target.exists());
}

#[cfg(unix)]
#[test]
fn test_missing_tool_is_fatal() {
    let temp = tempdir().unwrap();

    let output = sitebuild()
        .current_dir(temp.path())
        .env("SITEBUILD_TOOL", "sitebuild-no-such-tool")
        .arg("install")
        .output()
        .expect("Failed to execute sitebuild");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sitebuild-no-such-tool was not found in the environment"));
}

#[test]
fn test_invalid_env_value_is_rejected() {
    let temp = tempdir().unwrap();

    let output = sitebuild()
        .current_dir(temp.path())
        .env("SITEBUILD_VERBOSE", "maybe")
        .arg("clean")
        .arg(temp.path().join("out"))
        .output()
        .expect("Failed to execute sitebuild");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SITEBUILD_VERBOSE"));
}

#[cfg(unix)]
#[test]
fn test_build_with_configured_steps() {
    let temp = tempdir().unwrap();
    let site = temp.path().join("site");
    std::fs::create_dir_all(&site).unwrap();
    std::fs::write(
        temp.path().join("sitebuild.toml"),
        r#"
[project]
root = "site"

[tool]
program = "sh"

[steps]
check = "echo checking"
build = "mkdir -p dist && echo hello > dist/index.html"
"#,
    )
    .unwrap();

    let output = sitebuild()
        .current_dir(temp.path())
        .args(["--color", "never", "build", "public"])
        .output()
        .expect("Failed to execute sitebuild");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Checking...DONE! (0)"));
    assert!(stdout.contains("Building...DONE! (0)"));
    assert!(stdout.contains("Copying...DONE! (0)"));
    assert_eq!(
        std::fs::read_to_string(temp.path().join("public/index.html")).unwrap(),
        "hello\n"
    );
    assert!(!site.join("dist").exists());
}

#[cfg(unix)]
#[test]
fn test_failing_step_code_is_exit_code() {
    let temp = tempdir().unwrap();
    std::fs::write(
        temp.path().join("sitebuild.toml"),
        r#"
[tool]
program = "sh"

[steps]
check = "echo broken; exit 3"
"#,
    )
    .unwrap();

    let output = sitebuild()
        .current_dir(temp.path())
        .args(["--color", "never", "build", "public"])
        .output()
        .expect("Failed to execute sitebuild");

    assert_eq!(output.status.code(), Some(3));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("broken").count(), 1);
    assert!(stdout.contains("Results: DONE! (3)"));
    assert!(!stdout.contains("Building..."));
    assert!(!temp.path().join("public").exists());
}

#[cfg(unix)]
#[test]
fn test_activate_prints_nothing_when_tool_on_path() {
    let temp = tempdir().unwrap();

    let output = sitebuild()
        .current_dir(temp.path())
        .env("SITEBUILD_TOOL", "sh")
        .args(["activate", "--shell", "posix"])
        .output()
        .expect("Failed to execute sitebuild");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
#[test]
fn test_relative_config_path_anchors_project_root() {
    let temp = tempdir().unwrap();
    std::fs::write(
        temp.path().join("sitebuild.toml"),
        r#"
[tool]
program = "sh"

[steps]
check = "true"
build = "mkdir -p dist && echo relative > dist/index.html"
"#,
    )
    .unwrap();

    let output = sitebuild()
        .current_dir(temp.path())
        .args(["--color", "never", "--config", "sitebuild.toml", "build", "public"])
        .output()
        .expect("Failed to execute sitebuild");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        std::fs::read_to_string(temp.path().join("public/index.html")).unwrap(),
        "relative\n"
    );
}
