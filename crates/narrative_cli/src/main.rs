//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `narrative_core` linkage and configuration loading.
//! - Load an optional JSON record file and print header statistics.
//!
//! Environment:
//! - `NARRATIVE_CONFIG`: optional JSON editor config path.
//! - `NARRATIVE_LOG_DIR`: optional absolute directory for rolling logs.

use narrative_core::{init_logging, DialogueEvent, EditorConfig, EditorSession, LogLevel};
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "NARRATIVE_LOG_DIR";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("narrative_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    if let Ok(dir) = std::env::var(LOG_DIR_ENV) {
        init_logging(LogLevel::build_default().as_str(), &dir)?;
    }

    let config = EditorConfig::from_env().map_err(|err| err.to_string())?;
    let records = match std::env::args().nth(1) {
        Some(path) => load_records(&path)?,
        None => Vec::new(),
    };

    let session = EditorSession::new(records, config).map_err(|err| err.to_string())?;
    let summary = session.store().summary();
    log::info!(
        "event=cli_summary module=cli status=ok events={}",
        summary.events
    );

    println!("narrative_core version={}", narrative_core::core_version());
    println!(
        "events={} missions={} speakers={}",
        summary.events, summary.missions, summary.speakers
    );
    println!(
        "history capacity={} debounce_ms={}",
        session.config().history.capacity,
        session.config().history.debounce_ms
    );
    Ok(())
}

fn load_records(path: &str) -> Result<Vec<DialogueEvent>, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read `{path}`: {err}"))?;
    serde_json::from_str(&raw).map_err(|err| format!("failed to parse `{path}`: {err}"))
}
