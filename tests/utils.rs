use sitedesk::utils::{datetime, human_size};

#[test]
fn human_size_picks_sensible_units() {
    assert_eq!(human_size(512), "512 B");
    assert_eq!(human_size(2048), "2.0 KiB");
    assert_eq!(human_size(5 * 1024 * 1024), "5.0 MiB");
}

#[test]
fn format_timestamp_handles_missing_values() {
    assert_eq!(datetime::format_timestamp(None), "-");
}

#[test]
fn format_timestamp_passes_through_garbage() {
    assert_eq!(datetime::format_timestamp(Some("not a date")), "not a date");
}

#[test]
fn format_timestamp_renders_rfc3339() {
    let rendered = datetime::format_timestamp(Some("2026-03-14T09:26:53+00:00"));
    // Rendered in local time, so only the month is stable across zones
    assert!(rendered.starts_with("2026-03-1"));
}
