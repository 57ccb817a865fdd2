pub mod file;
pub mod stdin;

use finreport_core::loader::{load_record, LoadedStatements};
use finreport_core::{EngineConfig, RawStatementStore};
use serde_json::Value;

/// Load statements from `--input` (JSON or CSV file) or from stdin.
///
/// A JSON object is a flat template row and goes through the loader; a JSON
/// array is an already-structured list of fiscal years. Piped text that does
/// not start like JSON is read as CSV.
pub fn load_statements(
    path: Option<&str>,
    config: &EngineConfig,
) -> Result<LoadedStatements, Box<dyn std::error::Error>> {
    let value = match path {
        Some(path) if file::is_csv(path) => Value::Object(file::read_csv_record(path)?),
        Some(path) => file::read_json_value(path)?,
        None => {
            let text = stdin::read_stdin()?
                .ok_or("No input: provide --input <file> or pipe JSON/CSV on stdin")?;
            parse_text(&text)?
        }
    };
    from_value(value, config)
}

fn parse_text(text: &str) -> Result<Value, Box<dyn std::error::Error>> {
    if text.starts_with('{') || text.starts_with('[') {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(Value::Object(file::csv_record(text.as_bytes())?))
    }
}

fn from_value(
    value: Value,
    config: &EngineConfig,
) -> Result<LoadedStatements, Box<dyn std::error::Error>> {
    match value {
        Value::Object(record) => Ok(load_record(&record, config)?),
        Value::Array(_) => {
            let store: RawStatementStore = serde_json::from_value(value)?;
            if store.is_empty() {
                return Err("Input contains no fiscal years".into());
            }
            Ok(LoadedStatements::from_store(store))
        }
        _ => Err("Input must be a JSON object (template row) or array (fiscal years)".into()),
    }
}
