//! TBI Mortality: pediatric traumatic brain injury mortality calculator
//!
//! Main entry point. Runs the terminal form when attached to a terminal,
//! otherwise scores one JSON patient from stdin.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tbi_mortality::adapters::sanitize::SanitizingMakeWriter;
use tbi_mortality::application::pipe;
use tbi_mortality::tui::App;

fn main() -> Result<()> {
    let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();

    // Writing logs to the terminal corrupts the TUI, and stdout carries the
    // result in pipe mode.
    // - interactive: log to a file
    // - pipe: log to stderr
    let log_mode = std::env::var("TBI_LOG_MODE").unwrap_or_else(|_| "auto".to_string());

    let (writer, log_guard) = match log_mode.as_str() {
        "stdout" => tracing_appender::non_blocking(std::io::stdout()),
        "stderr" => tracing_appender::non_blocking(std::io::stderr()),
        "file" => tracing_appender::non_blocking(open_log_file()?),
        // auto
        _ if interactive => tracing_appender::non_blocking(open_log_file()?),
        _ => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    tracing::info!(interactive, "Starting TBI mortality calculator...");

    if interactive {
        let mut app = App::new();
        app.run()?;
    } else {
        let response = pipe::run(std::io::stdin().lock(), std::io::stdout().lock())?;
        if !response.is_ok() {
            tracing::info!("Calculator shutdown complete.");
            drop(log_guard);
            std::process::exit(1);
        }
    }

    tracing::info!("Calculator shutdown complete.");
    Ok(())
}

fn open_log_file() -> std::io::Result<std::fs::File> {
    let log_file =
        std::env::var("TBI_LOG_FILE").unwrap_or_else(|_| "tbi-mortality.log".to_string());

    if let Some(parent) = std::path::Path::new(&log_file).parent() {
        if !parent.as_os_str().is_empty() {
            // Best-effort: the open below reports the real failure.
            let _ = std::fs::create_dir_all(parent);
        }
    }

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
}
