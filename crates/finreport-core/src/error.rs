use thiserror::Error;

/// Failures of the loader and configuration layers. Indicator calculation
/// itself never fails; absent inputs surface as missing values.
#[derive(Debug, Error)]
pub enum FinReportError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}
