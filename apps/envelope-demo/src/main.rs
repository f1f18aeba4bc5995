use envelope_demo::app::EnvelopeApp;
use envelope_demo::error::DemoError;
use envelope_demo::logger::initialize as LoggerInitialize;
use envelope_demo::scenarios;

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::path::PathBuf;
use std::process::ExitCode;

use log::{debug, error, info};

const APP_DIR_NAME: &str = "envelope-demo";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), DemoError> {
    // Config directory: first argument, else the working directory
    let config_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join("logs");

    create_dir_all(&log_dir).map_err(|e| DemoError::Demo {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Crash target comes from config, so read it before the logger exists
    let config = EnvelopeApp::load_config(&config_dir)?;
    LoggerInitialize(&log_dir, &config.error_handler_crash_logger)?;

    info!("Envelope demo starting");
    info!("Log directory: {}", log_dir.display());
    info!("Config directory: {}", config_dir.display());
    debug!("Config: {config:?}");

    let app = EnvelopeApp::from_config(config)?;

    for outcome in scenarios::run(&app)? {
        let body = serde_json::to_string_pretty(&outcome.envelope.body).map_err(|e| {
            DemoError::Demo {
                message: format!("Failed to render {}: {e}", outcome.label),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;
        println!("== {} ({})\n{body}\n", outcome.label, outcome.envelope.status);
    }

    Ok(())
}
