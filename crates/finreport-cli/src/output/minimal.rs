use serde_json::Value;

use super::{result_of, scalar_text};

/// Fields worth printing on their own, in priority order.
const PRIORITY_KEYS: [&str; 6] = [
    "rating",
    "level",
    "net_profit_margin",
    "debt_to_asset_ratio",
    "direction",
    "display",
];

/// Print just the key answer value from the output.
///
/// Searches the result depth-first for the first non-null priority key, then
/// falls back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    for key in PRIORITY_KEYS {
        if let Some(found) = find_key(result, key) {
            println!("{}", scalar_text(found));
            return;
        }
    }

    if let Value::Object(map) = result {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    println!("{}", scalar_text(result));
}

fn find_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map
            .get(key)
            .filter(|v| !v.is_null())
            .or_else(|| map.values().find_map(|v| find_key(v, key))),
        Value::Array(items) => items.iter().find_map(|v| find_key(v, key)),
        _ => None,
    }
}
