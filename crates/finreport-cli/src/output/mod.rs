pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use finreport_core::presentation::DATA_MISSING;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` of a computation envelope, or the value itself.
pub fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Flatten nested objects into `(path, text)` rows.
///
/// Array elements that name an `indicator` or `dimension` are keyed by that
/// name instead of their position, so `2023.profitability.net_profit_margin`
/// and `dimensions.solvency.level` read naturally.
pub fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into("", value, &mut rows);
    rows
}

fn flatten_into(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_into(&join(key), val, rows);
            }
        }
        Value::Array(items) if items.iter().any(Value::is_object) => {
            for (idx, item) in items.iter().enumerate() {
                let label = item
                    .get("indicator")
                    .or_else(|| item.get("dimension"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| idx.to_string());
                flatten_into(&join(&label), item, rows);
            }
        }
        _ => rows.push((prefix.to_string(), scalar_text(value))),
    }
}

/// Render a leaf value; missing values print as the data-missing marker.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => DATA_MISSING.to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(scalar_text).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
