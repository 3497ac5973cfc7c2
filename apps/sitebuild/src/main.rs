//! sitebuild - build, clean, install and serve a static website
//!
//! This is the CLI application that drives the build orchestrator and
//! renders its events.

mod cli;
mod error;
mod events;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use sitebuild_builder::{BuildContext, BuildOrchestrator};
use sitebuild_config::{ColorChoice, Config};
use sitebuild_events::{AppEvent, EventEmitter, EventReceiver, EventSender, PlatformEvent};
use sitebuild_platform::{EnvAction, ShellKind, ShellRunner, ToolEnvironment, ToolLocator};
use std::process;
use std::sync::Arc;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.debug);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Error: {e}");
            1
        }
    };
    process::exit(code);
}

/// Main application logic; returns the process exit code
async fn run(cli: Cli) -> Result<i32, CliError> {
    info!("Starting sitebuild v{}", env!("CARGO_PKG_VERSION"));

    // defaults <- file <- environment <- flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, &cli.global)?;

    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stdout().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(colors_enabled, config.general.verbose);
    let (event_sender, mut event_receiver) = sitebuild_events::channel();

    let mut tool_env = ToolEnvironment::from_process();
    let mut actions = Vec::new();
    if needs_tool(&cli.command) {
        match bootstrap_tool(&config, &tool_env, &event_sender) {
            Ok(found) => actions = found,
            Err(e) => {
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return Err(e);
            }
        }
        tool_env.apply(&actions);
    }

    let context =
        BuildContext::from_config(&config, tool_env).with_event_sender(event_sender);
    let orchestrator =
        BuildOrchestrator::new(context, config.steps.clone(), Arc::new(ShellRunner::new()));

    let result = execute_command_with_events(
        cli.command,
        &orchestrator,
        &actions,
        event_receiver,
        &mut event_handler,
    )
    .await?;

    match result {
        Some(code) => {
            info!(exit_code = code, "Command completed");
            Ok(code)
        }
        None => {
            info!("Interrupted");
            Ok(0)
        }
    }
}

/// Every command except `clean` spawns the tool
fn needs_tool(command: &Commands) -> bool {
    !matches!(command, Commands::Clean { .. })
}

/// Make sure the tool is reachable, reporting where it was found
fn bootstrap_tool(
    config: &Config,
    env: &ToolEnvironment,
    events: &EventSender,
) -> Result<Vec<EnvAction>, CliError> {
    let locator = ToolLocator::new(
        config.tool.program.clone(),
        config.tool.fallback_env_vars.clone(),
        config.tool.fallback_subdir.clone(),
    );
    let tool = locator.tool().to_string();

    match locator.bootstrap_from_process(env) {
        Ok(actions) => {
            if actions.is_empty() {
                if let Some(path) = env.resolve(&tool) {
                    events.emit(AppEvent::Platform(PlatformEvent::ToolResolved {
                        tool: tool.clone(),
                        path,
                    }));
                }
            }
            for action in &actions {
                let EnvAction::AugmentPath(directory) = action;
                events.emit(AppEvent::Platform(PlatformEvent::PathAugmented {
                    tool: tool.clone(),
                    directory: directory.clone(),
                }));
            }
            Ok(actions)
        }
        Err(e) => {
            events.emit(AppEvent::Platform(PlatformEvent::ToolMissing {
                candidates: locator.candidates(|key| std::env::var_os(key)),
                tool,
            }));
            Err(e.into())
        }
    }
}

/// Execute command with concurrent event handling
///
/// Returns `None` when the user interrupted the command.
async fn execute_command_with_events(
    command: Commands,
    orchestrator: &BuildOrchestrator,
    actions: &[EnvAction],
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<Option<i32>, CliError> {
    let mut command_future = Box::pin(execute_command(command, orchestrator, actions));
    let mut interrupt = Box::pin(tokio::signal::ctrl_c());

    loop {
        select! {
            // Interrupt wins over a command that finishes in the same wakeup
            biased;

            Ok(()) = &mut interrupt => {
                // Dropping the command future kills the running step
                return Ok(None);
            }

            result = &mut command_future => {
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result.map(Some);
            }

            event = event_receiver.recv() => {
                match event {
                    Some(event) => event_handler.handle_event(event),
                    None => { /* Channel closed: keep waiting for command to finish */ }
                }
            }
        }
    }
}

/// Execute the specified command
async fn execute_command(
    command: Commands,
    orchestrator: &BuildOrchestrator,
    actions: &[EnvAction],
) -> Result<i32, CliError> {
    let report = match command {
        Commands::Build { output_dir } => orchestrator.build(&output_dir).await?,
        Commands::Clean { output_dir } => orchestrator.clean(&output_dir).await?,
        Commands::Install => orchestrator.install().await?,
        Commands::Dev => orchestrator.dev().await?,
        Commands::Activate { shell } => {
            let shell = shell.map_or_else(ShellKind::native, ShellKind::from);
            for action in actions {
                println!("{}", action.render(shell));
            }
            return Ok(0);
        }
    };
    Ok(report.exit_code)
}

/// Initialize tracing/logging
fn init_tracing(debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_dir = sitebuild_config::logs_dir();
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = log_dir.join(format!(
            "sitebuild-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new("info,sitebuild=debug"),
                        ),
                    )
                    .init();

                eprintln!("Debug logging enabled: {}", log_file.display());
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
                // Fallback to stderr
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                    )
                    .init();
            }
        }
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs) -> Result<(), CliError> {
    if let Some(color) = global.color {
        config.general.color = color;
    }

    if global.verbose {
        config.general.verbose = true;
    }

    if let Some(root) = &global.project_root {
        config.project.root = Some(std::path::absolute(root)?);
    }

    Ok(())
}
