use serde::{Deserialize, Serialize};

use crate::config::EstimationRatios;
use crate::safe_math::{safe_ratio, PLAIN};
use crate::statements::{Field, Statement, YearlyFinancialData};
use crate::types::Figure;

/// Turnover multiples on period-end balances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationsIndicators {
    pub receivables_turnover: Figure,
    pub inventory_turnover: Figure,
    pub total_asset_turnover: Figure,
}

/// Receivables and inventory are carved out of current assets by fixed
/// shares. Denominators are closing balances, not period averages.
pub fn calculate(
    data: &YearlyFinancialData,
    estimation: &EstimationRatios,
) -> OperationsIndicators {
    let revenue = data.value(Statement::IncomeStatement, Field::OperatingRevenue);
    let costs = data.value(Statement::IncomeStatement, Field::OperatingCosts);
    let current_assets = data.value(Statement::BalanceSheet, Field::CurrentAssets);
    let total_assets = data.value(Statement::BalanceSheet, Field::TotalAssets);

    let receivables = current_assets.map(|ca| ca * estimation.receivables_share);
    let inventory = current_assets.map(|ca| ca * estimation.inventory_share);

    OperationsIndicators {
        receivables_turnover: safe_ratio(revenue, receivables, PLAIN),
        inventory_turnover: safe_ratio(costs, inventory, PLAIN),
        total_asset_turnover: safe_ratio(revenue, total_assets, PLAIN),
    }
}
