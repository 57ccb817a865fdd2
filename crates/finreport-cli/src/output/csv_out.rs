use finreport_core::presentation::DATA_MISSING;
use serde_json::Value;
use std::io;

use super::{flatten, result_of, scalar_text};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    write_csv(value, stdout.lock());
}

/// Arrays of objects become one row per element; anything else becomes
/// `field,value` pairs from the flattened result.
fn write_csv<W: io::Write>(value: &Value, sink: W) {
    let mut wtr = csv::Writer::from_writer(sink);

    match result_of(value) {
        Value::Array(rows) if !rows.is_empty() && rows.iter().all(Value::is_object) => {
            write_array_csv(&mut wtr, rows)
        }
        other => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in flatten(other) {
                let _ = wtr.write_record([key, val]);
            }
        }
    }

    let _ = wtr.flush();
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for item in rows {
        let row: Vec<String> = headers
            .iter()
            .map(|h| match item.get(*h) {
                Some(v) => scalar_text(v),
                None => DATA_MISSING.to_string(),
            })
            .collect();
        let _ = wtr.write_record(&row);
    }
}
