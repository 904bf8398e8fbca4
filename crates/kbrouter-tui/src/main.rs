//! Kbrouter TUI
//!
//! Terminal chat interface over the knowledge-base router.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kbrouter_core::error::exit_codes;
use kbrouter_core::{EventBuffer, Router, ServiceConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::path::Path;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

mod app;
mod event;
mod ui;

use app::App;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let guard = init_tracing(&ServiceConfig::log_file_from_env())?;

    // Fatal before the terminal is touched
    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            drop(guard);
            std::process::exit(exit_codes::INVALID_INPUT);
        }
    };
    tracing::info!("Environment variables loaded");

    let events = Arc::new(EventBuffer::new());
    let router = Router::connect(&config, events.clone()).await;
    let mut app = App::new(router, events, &config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.pending.is_some() {
            // "Processing..." is on screen while the turn runs
            app.process_pending().await;
            continue;
        }

        event::handle_events(app).await?;

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// The terminal is in use, so logs only go to the diagnostic file
fn init_tracing(log_file: &Path) -> Result<WorkerGuard> {
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)?;
    let file_name = log_file
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new(kbrouter_core::DEFAULT_LOG_FILE));

    let (non_blocking, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .init();

    Ok(guard)
}
