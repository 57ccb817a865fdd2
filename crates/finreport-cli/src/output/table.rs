use finreport_core::presentation::DATA_MISSING;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, result_of, scalar_text};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let result = result_of(value);
    match result {
        Value::Array(rows) if rows.iter().all(Value::is_object) => print_array_table(rows),
        _ => print_field_table(result),
    }

    let Some(envelope) = value.as_object().filter(|m| m.contains_key("result")) else {
        return;
    };

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_table(value: &Value) {
    println!("{}", field_table(value));
}

fn print_array_table(rows: &[Value]) {
    match array_table(rows) {
        Some(table) => println!("{}", table),
        None => println!("(empty)"),
    }
}

fn field_table(value: &Value) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(value) {
        builder.push_record([key, val]);
    }
    Table::from(builder)
}

fn array_table(rows: &[Value]) -> Option<Table> {
    let Some(Value::Object(first)) = rows.first() else {
        return None;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in rows {
        let row: Vec<String> = headers
            .iter()
            .map(|h| match item.get(h.as_str()) {
                Some(v) => scalar_text(v),
                None => DATA_MISSING.to_string(),
            })
            .collect();
        builder.push_record(row);
    }

    Some(Table::from(builder))
}
