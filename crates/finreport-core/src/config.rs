//! Engine configuration.
//!
//! Every field has a default, so an empty YAML/JSON document is a valid
//! configuration and reproduces the stock behaviour.

use serde::{Deserialize, Serialize};

use crate::{FinReportError, FinReportResult};

/// Shares of current assets used when a dedicated line item is not
/// available. Quick assets exclude an inventory-like share; receivables and
/// inventory are carved out of current assets for the turnover ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationRatios {
    pub quick_asset_share: f64,
    pub receivables_share: f64,
    pub inventory_share: f64,
}

impl Default for EstimationRatios {
    fn default() -> Self {
        Self {
            quick_asset_share: 0.8,
            receivables_share: 0.3,
            inventory_share: 0.2,
        }
    }
}

impl EstimationRatios {
    pub fn validate(&self) -> FinReportResult<()> {
        for (field, value) in [
            ("quick_asset_share", self.quick_asset_share),
            ("receivables_share", self.receivables_share),
            ("inventory_share", self.inventory_share),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(FinReportError::InvalidInput {
                    field: format!("estimation.{field}"),
                    reason: format!("Share must lie in (0, 1], got {value}."),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub estimation: EstimationRatios,
    /// Number of most recent fiscal years the loader keeps.
    pub max_years: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            estimation: EstimationRatios::default(),
            max_years: 2,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> FinReportResult<()> {
        self.estimation.validate()?;
        if self.max_years == 0 {
            return Err(FinReportError::InvalidInput {
                field: "max_years".into(),
                reason: "At least one fiscal year must be kept.".into(),
            });
        }
        Ok(())
    }
}
