//! Key/value list output formatting
//!
//! Renders each record as a block of `Key : value` lines, one blank line
//! between records. Field names come from the record's serialized form.

use serde::Serialize;
use serde_json::Value;

/// Format data as per-record key/value blocks
pub fn format_list<T: Serialize>(data: &[T]) -> Result<String, serde_json::Error> {
    if data.is_empty() {
        return Ok("No results found.".to_string());
    }

    let mut blocks = Vec::with_capacity(data.len());
    for item in data {
        let value = serde_json::to_value(item)?;
        blocks.push(render_record(&value));
    }
    Ok(blocks.join("\n\n"))
}

fn render_record(value: &Value) -> String {
    let Value::Object(fields) = value else {
        return render_scalar(value);
    };

    let width = fields.keys().map(String::len).max().unwrap_or(0);
    fields
        .iter()
        .map(|(key, value)| format!("{key:width$} : {}", render_scalar(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
