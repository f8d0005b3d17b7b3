use serde_json::{json, Value};

/// Pretty-print JSON to stdout.
pub fn print_json(value: &Value) {
    match render_json(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Envelopes render as-is; bare narrative text is wrapped as
/// `{"narrative": ...}` so JSON output is always an object.
pub fn render_json(value: &Value) -> serde_json::Result<String> {
    match value {
        Value::String(text) => serde_json::to_string_pretty(&json!({ "narrative": text })),
        _ => serde_json::to_string_pretty(value),
    }
}
