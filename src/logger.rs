//! Logging utilities: an in-memory logger backing the debug dialog, plus the
//! file logger setup used when logging is enabled in config.

use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::{Arc, Mutex};

use crate::config::LoggingConfig;

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Ok(mut logs) = self.logs.lock() {
            logs.push(formatted_message);
        }
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            sorted_logs.reverse();
            sorted_logs
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Route `log` macro output to a file when enabled. Logging to the terminal
/// would fight the TUI for the screen, so stdout is never used.
pub fn init_file_logging(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let path = config.file.clone().unwrap_or_else(|| "sitedesk.log".to_string());

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(fern::log_file(&path).with_context(|| format!("Failed to open log file {path}"))?)
        .apply()
        .context("Failed to install logger")?;

    Ok(())
}
