//! JSON output formatting
//!
//! JSON is the default output format for one-shot reports.

use serde::Serialize;

/// Format a report as pretty-printed JSON
pub fn format_json<T: Serialize>(report: &T) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        format!(
            r#"{{"error": true, "code": "SERIALIZATION_ERROR", "message": "{}"}}"#,
            e
        )
    })
}
