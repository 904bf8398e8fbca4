//! Kbrouter CLI
//!
//! Routes questions to a knowledge base or a general-purpose model.

use anyhow::Result;
use clap::Parser;
use kbrouter_core::error::exit_codes;
use kbrouter_core::ServiceConfig;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

/// Startup errors are printed directly, so stderr logging skips them
const STARTUP_TARGET: &str = "kbrouter::startup";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dotenv = dotenvy::dotenv();

    let guard = init_tracing(&ServiceConfig::log_file_from_env(), cli.verbose)?;
    match dotenv {
        Ok(path) => tracing::info!("Environment variables loaded from {}", path.display()),
        Err(e) if e.not_found() => tracing::info!("Environment variables loaded"),
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(target: STARTUP_TARGET, "{}", e);
            eprintln!("Error: {}", e);
            // Flush the log before exiting
            drop(guard);
            std::process::exit(exit_codes::INVALID_INPUT);
        }
    };

    match cli.command {
        Commands::Config => commands::config::run(&config, cli.format),
        Commands::Ask(args) => commands::ask::run(&config, &args.text(), cli.format).await,
        Commands::Classify(args) => {
            commands::classify::run(&config, &args.text(), cli.format).await
        }
        Commands::Chat => commands::chat::run(&config).await,
    }
}

/// Stderr gets warnings (debug with `--verbose`); the diagnostic log file gets
/// everything at info and above.
fn init_tracing(log_file: &Path, verbose: bool) -> Result<WorkerGuard> {
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)?;
    let file_name = log_file
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new(kbrouter_core::DEFAULT_LOG_FILE));

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::from_default_env()
                .add_directive(stderr_level.into())
                .add_directive(format!("{}=off", STARTUP_TARGET).parse()?),
        );

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
