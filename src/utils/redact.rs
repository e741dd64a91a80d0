use serde_json::Value as JsonValue;

const REDACTED: &str = "[REDACTED]";

/// Masks user-supplied text inside a JSON payload so it can be logged.
/// Structure and non-sensitive values are kept as-is.
pub fn redact_sensitive_data(data: &JsonValue) -> JsonValue {
    match data {
        JsonValue::Object(map) => {
            let mut redacted_map = serde_json::Map::new();
            for (key, val) in map {
                let redacted_val = if is_sensitive_field(key) {
                    redact_string_value(val)
                } else {
                    redact_sensitive_data(val)
                };
                redacted_map.insert(key.clone(), redacted_val);
            }
            JsonValue::Object(redacted_map)
        }
        JsonValue::Array(arr) => JsonValue::Array(arr.iter().map(redact_sensitive_data).collect()),
        _ => data.clone(),
    }
}

/// Log-safe summary of free text: its length in characters, never its content.
pub fn describe_text(text: &str) -> String {
    format!("<{} chars>", text.chars().count())
}

fn is_sensitive_field(field_name: &str) -> bool {
    matches!(
        field_name.to_lowercase().as_str(),
        "text" | "content" | "document"
    )
}

fn redact_string_value(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::String(s) if !s.is_empty() => JsonValue::String(REDACTED.to_string()),
        _ => value.clone(),
    }
}
