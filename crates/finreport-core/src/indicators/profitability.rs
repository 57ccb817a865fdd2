use serde::{Deserialize, Serialize};

use crate::safe_math::{safe_ratio, PERCENT};
use crate::statements::{Field, Statement, YearlyFinancialData};
use crate::types::Figure;

/// Margins and ROE, all in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityIndicators {
    pub net_profit_margin: Figure,
    pub gross_profit_margin: Figure,
    pub return_on_equity: Figure,
}

pub fn calculate(data: &YearlyFinancialData) -> ProfitabilityIndicators {
    let revenue = data.value(Statement::IncomeStatement, Field::OperatingRevenue);
    let costs = data.value(Statement::IncomeStatement, Field::OperatingCosts);
    let net_profit = data.value(Statement::IncomeStatement, Field::NetProfit);
    let equity = data.value(Statement::BalanceSheet, Field::OwnersEquity);

    // Only computed when both sides are known; never revenue - 0 or 0 - cost.
    let gross_profit = revenue.zip(costs).map(|(r, c)| r - c);

    ProfitabilityIndicators {
        net_profit_margin: safe_ratio(net_profit, revenue, PERCENT),
        gross_profit_margin: safe_ratio(gross_profit, revenue, PERCENT),
        return_on_equity: safe_ratio(net_profit, equity, PERCENT),
    }
}
