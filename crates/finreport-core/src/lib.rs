pub mod config;
pub mod error;
pub mod indicators;
pub mod presentation;
pub mod safe_math;
pub mod statements;
pub mod trend;
pub mod types;

#[cfg(feature = "loader")]
pub mod loader;

#[cfg(feature = "risk")]
pub mod risk;

#[cfg(feature = "narration")]
pub mod narration;

pub use config::{EngineConfig, EstimationRatios};
pub use error::FinReportError;
pub use indicators::{
    calculate_all_indicators, AllIndicators, Dimension, Indicator, YearIndicators,
};
pub use statements::{CompanyProfile, Field, RawStatementStore, Statement, YearlyFinancialData};
pub use types::*;

/// Standard result type for fallible finreport operations
pub type FinReportResult<T> = Result<T, FinReportError>;
