//! Helper functions and utilities
//!
//! Display formatting shared by the console views.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Placeholder for empty values in tables
pub const EMPTY_PLACEHOLDER: &str = "—";

/// Format a date for display, e.g. `Mar 7, 2025`
pub fn format_date(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => ts.format("%b %-d, %Y").to_string(),
        None => String::new(),
    }
}

/// Format a date and time for display, e.g. `Mar 7, 2025, 09:05 AM`
pub fn format_date_time(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => ts.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => String::new(),
    }
}

/// Truncate text to `length` characters, appending an ellipsis when cut
pub fn truncate_text(text: &str, length: usize) -> String {
    if text.chars().count() > length {
        let head: String = text.chars().take(length).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Render a registration answer for display
pub fn format_answer_value(value: &Value) -> String {
    match value {
        Value::Null => EMPTY_PLACEHOLDER.to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::String(s) if s.is_empty() => EMPTY_PLACEHOLDER.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if items.is_empty() => EMPTY_PLACEHOLDER.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_format_date() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(format_date(Some(ts)), "Mar 7, 2025");
        assert_eq!(format_date_time(Some(ts)), "Mar 7, 2025, 09:05 AM");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 5), "hello...");
        assert_eq!(truncate_text("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_format_answer_value() {
        assert_eq!(format_answer_value(&json!(true)), "Yes");
        assert_eq!(format_answer_value(&json!(false)), "No");
        assert_eq!(format_answer_value(&json!(["a", "b"])), "a, b");
        assert_eq!(format_answer_value(&json!([])), EMPTY_PLACEHOLDER);
        assert_eq!(format_answer_value(&json!("")), EMPTY_PLACEHOLDER);
        assert_eq!(format_answer_value(&Value::Null), EMPTY_PLACEHOLDER);
        assert_eq!(format_answer_value(&json!(42)), "42");
        assert_eq!(format_answer_value(&json!({"k": 1})), r#"{"k":1}"#);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Spring   Fest \n 2025 "), "Spring Fest 2025");
    }
}
