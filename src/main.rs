//! Rhai Console - Main Entry Point
//!
//! Opens a console window with a live Rhai runtime. Logs go to stderr and to a
//! daily rolling file in the app data directory.

use anyhow::Context;
use rhai_console::{
    config::{self, ConsoleConfig},
    frontend::ConsoleApp,
    ConsoleSession, InputHistory,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging();

    tracing::info!("Starting Rhai console");

    let config = ConsoleConfig::load_or_default();
    let mut session = ConsoleSession::from_config(&config);

    let history_path = config.history.persist.then(config::history_path).flatten();
    if let Some(path) = &history_path {
        match InputHistory::load_from(path, config.history.max_commands) {
            Ok(history) => session.set_history(history),
            Err(e) => tracing::warn!("Failed to load command history: {}", e),
        }
    }

    // Configure eframe options
    let (width, height) = config.window.size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Rhai Console"),
        ..Default::default()
    };

    eframe::run_native(
        "Rhai Console",
        native_options,
        Box::new(move |cc| Ok(Box::new(ConsoleApp::new(cc, session, config, history_path)))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
    .context("Console window failed")?;

    tracing::info!("Shutting down...");
    Ok(())
}

/// Install the stderr and rolling file log layers
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rhai_console=debug"));

    let file_writer = config::ensure_app_data_dir()
        .map(|dir| dir.join(config::LOG_DIR))
        .ok()
        .map(|dir| tracing_appender::rolling::daily(dir, "rhai-console.log"))
        .map(tracing_appender::non_blocking);

    match file_writer {
        Some((writer, guard)) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
            tracing::warn!("No app data directory; logging to stderr only");
            None
        }
    }
}
