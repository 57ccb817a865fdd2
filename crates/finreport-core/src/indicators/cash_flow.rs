use serde::{Deserialize, Serialize};

use crate::safe_math::{safe_ratio, PLAIN};
use crate::statements::{Field, Statement, YearlyFinancialData};
use crate::types::Figure;

/// Cash conversion plus two amounts copied straight from the cash flow
/// statement (ten-thousand currency units, unrounded).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowIndicators {
    pub cash_to_profit_ratio: Figure,
    pub operating_cash_flow: Figure,
    pub net_cash_increase: Figure,
}

pub fn calculate(data: &YearlyFinancialData) -> CashFlowIndicators {
    let net_profit = data.value(Statement::IncomeStatement, Field::NetProfit);
    let operating_cash_flow = data.value(Statement::CashFlowStatement, Field::OperatingCashFlow);

    CashFlowIndicators {
        cash_to_profit_ratio: safe_ratio(operating_cash_flow, net_profit, PLAIN),
        operating_cash_flow,
        net_cash_increase: data.value(Statement::CashFlowStatement, Field::NetCashIncrease),
    }
}
