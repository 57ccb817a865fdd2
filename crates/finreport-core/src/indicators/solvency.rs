use serde::{Deserialize, Serialize};

use crate::config::EstimationRatios;
use crate::safe_math::{safe_ratio, PERCENT, PLAIN};
use crate::statements::{Field, Statement, YearlyFinancialData};
use crate::types::Figure;

/// Leverage (percent) and liquidity (plain ratios).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SolvencyIndicators {
    pub debt_to_asset_ratio: Figure,
    pub current_ratio: Figure,
    pub quick_ratio: Figure,
}

/// Quick assets are approximated as a fixed share of current assets since no
/// inventory line is available at this layer.
pub fn calculate(data: &YearlyFinancialData, estimation: &EstimationRatios) -> SolvencyIndicators {
    let total_assets = data.value(Statement::BalanceSheet, Field::TotalAssets);
    let total_liabilities = data.value(Statement::BalanceSheet, Field::TotalLiabilities);
    let current_assets = data.value(Statement::BalanceSheet, Field::CurrentAssets);
    let current_liabilities = data.value(Statement::BalanceSheet, Field::CurrentLiabilities);

    let quick_assets = current_assets.map(|ca| ca * estimation.quick_asset_share);

    SolvencyIndicators {
        debt_to_asset_ratio: safe_ratio(total_liabilities, total_assets, PERCENT),
        current_ratio: safe_ratio(current_assets, current_liabilities, PLAIN),
        quick_ratio: safe_ratio(quick_assets, current_liabilities, PLAIN),
    }
}
