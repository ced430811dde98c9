//! Date and time formatting helpers

use chrono::{DateTime, Local};

/// Date format used across the UI and config defaults.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Datetime format for timestamps in panels.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render a backend RFC 3339 timestamp in local time for display.
/// Unparseable or missing values come back as "-".
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "-".to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(&Local).format(DATETIME_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}
