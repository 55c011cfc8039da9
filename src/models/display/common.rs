//! Common display utilities and helpers

/// Placeholder for values the API did not provide
pub const MISSING: &str = "--";

/// `YYYY-MM-DD` prefix of an ISO-8601 timestamp, or [`MISSING`]
pub fn short_date(timestamp: &str) -> String {
    match timestamp.get(..10) {
        Some(date) if !date.is_empty() => date.to_string(),
        _ if timestamp.is_empty() => MISSING.to_string(),
        _ => timestamp.to_string(),
    }
}

/// `value` or [`MISSING`] when empty
pub fn or_missing(value: &str) -> String {
    if value.is_empty() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}

/// Human-readable duration, e.g. `2m 5s`
pub fn format_duration(seconds: Option<u64>) -> String {
    let Some(secs) = seconds else {
        return MISSING.to_string();
    };

    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Human-readable byte size, e.g. `1.5 MiB`
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
