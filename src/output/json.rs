//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a, T> {
    pub data: &'a [T],
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Number of items in `data`
    pub count: usize,

    /// RFC 3339 time the output was produced
    pub timestamp: String,

    /// CLI version
    pub version: &'static str,
}

impl<'a, T> JsonOutput<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self {
            data,
            meta: Metadata {
                count: data.len(),
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

/// Format a list as pretty-printed JSON inside the `data`/`meta` envelope
pub fn format_json<T: Serialize>(data: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}
