use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::types::Figure;

// ---------------------------------------------------------------------------
// Canonical vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    BalanceSheet,
    IncomeStatement,
    CashFlowStatement,
}

impl Statement {
    pub const ALL: [Statement; 3] = [
        Statement::BalanceSheet,
        Statement::IncomeStatement,
        Statement::CashFlowStatement,
    ];

    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::BalanceSheet => &[
                Field::TotalAssets,
                Field::CurrentAssets,
                Field::NonCurrentAssets,
                Field::TotalLiabilities,
                Field::CurrentLiabilities,
                Field::NonCurrentLiabilities,
                Field::OwnersEquity,
            ],
            Self::IncomeStatement => &[
                Field::OperatingRevenue,
                Field::OperatingCosts,
                Field::OperatingProfit,
                Field::TotalProfit,
                Field::NetProfit,
            ],
            Self::CashFlowStatement => &[
                Field::OperatingCashFlow,
                Field::InvestingCashFlow,
                Field::FinancingCashFlow,
                Field::NetCashIncrease,
            ],
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BalanceSheet => "balance_sheet",
            Self::IncomeStatement => "income_statement",
            Self::CashFlowStatement => "cash_flow_statement",
        };
        write!(f, "{}", s)
    }
}

/// Canonical statement line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    TotalAssets,
    CurrentAssets,
    NonCurrentAssets,
    TotalLiabilities,
    CurrentLiabilities,
    NonCurrentLiabilities,
    OwnersEquity,
    OperatingRevenue,
    OperatingCosts,
    OperatingProfit,
    TotalProfit,
    NetProfit,
    OperatingCashFlow,
    InvestingCashFlow,
    FinancingCashFlow,
    NetCashIncrease,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::TotalAssets,
        Field::CurrentAssets,
        Field::NonCurrentAssets,
        Field::TotalLiabilities,
        Field::CurrentLiabilities,
        Field::NonCurrentLiabilities,
        Field::OwnersEquity,
        Field::OperatingRevenue,
        Field::OperatingCosts,
        Field::OperatingProfit,
        Field::TotalProfit,
        Field::NetProfit,
        Field::OperatingCashFlow,
        Field::InvestingCashFlow,
        Field::FinancingCashFlow,
        Field::NetCashIncrease,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::TotalAssets => "total_assets",
            Self::CurrentAssets => "current_assets",
            Self::NonCurrentAssets => "non_current_assets",
            Self::TotalLiabilities => "total_liabilities",
            Self::CurrentLiabilities => "current_liabilities",
            Self::NonCurrentLiabilities => "non_current_liabilities",
            Self::OwnersEquity => "owners_equity",
            Self::OperatingRevenue => "operating_revenue",
            Self::OperatingCosts => "operating_costs",
            Self::OperatingProfit => "operating_profit",
            Self::TotalProfit => "total_profit",
            Self::NetProfit => "net_profit",
            Self::OperatingCashFlow => "operating_cash_flow",
            Self::InvestingCashFlow => "investing_cash_flow",
            Self::FinancingCashFlow => "financing_cash_flow",
            Self::NetCashIncrease => "net_cash_increase",
        }
    }

    /// The statement this line item is reported on.
    pub fn statement(self) -> Statement {
        match self {
            Self::TotalAssets
            | Self::CurrentAssets
            | Self::NonCurrentAssets
            | Self::TotalLiabilities
            | Self::CurrentLiabilities
            | Self::NonCurrentLiabilities
            | Self::OwnersEquity => Statement::BalanceSheet,
            Self::OperatingRevenue
            | Self::OperatingCosts
            | Self::OperatingProfit
            | Self::TotalProfit
            | Self::NetProfit => Statement::IncomeStatement,
            Self::OperatingCashFlow
            | Self::InvestingCashFlow
            | Self::FinancingCashFlow
            | Self::NetCashIncrease => Statement::CashFlowStatement,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown statement field '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Per-year figures
// ---------------------------------------------------------------------------

/// Statement name -> field name -> amount for one fiscal year.
///
/// A field that is absent and a field present with `None` are read the same
/// way: as missing. Deserializing files every field under its own statement,
/// whichever statement the document listed it under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlyFinancialData {
    statements: BTreeMap<Statement, BTreeMap<Field, Figure>>,
}

impl YearlyFinancialData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter filing the value under the field's own statement.
    pub fn with(mut self, field: Field, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }

    pub fn set(&mut self, field: Field, value: Figure) {
        self.statements
            .entry(field.statement())
            .or_default()
            .insert(field, value);
    }

    /// Look up a line item on a specific statement.
    pub fn value(&self, statement: Statement, field: Field) -> Figure {
        self.statements
            .get(&statement)
            .and_then(|fields| fields.get(&field))
            .copied()
            .flatten()
    }

    pub fn statement(&self, statement: Statement) -> Option<&BTreeMap<Field, Figure>> {
        self.statements.get(&statement)
    }

    /// Number of line items that carry a value.
    pub fn present_count(&self) -> usize {
        self.statements
            .values()
            .flat_map(|fields| fields.values())
            .filter(|v| v.is_some())
            .count()
    }
}

impl Serialize for YearlyFinancialData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.statements.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for YearlyFinancialData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<Statement, BTreeMap<Field, Figure>>::deserialize(deserializer)?;
        let mut data = Self::new();
        for (statement, fields) in raw {
            for (field, value) in fields {
                if field.statement() != statement {
                    warn!(
                        %field,
                        listed_under = %statement,
                        "line item re-filed under its own statement"
                    );
                }
                // An explicit null never hides a value already filed.
                if value.is_some() || data.value(field.statement(), field).is_none() {
                    data.set(field, value);
                }
            }
        }
        Ok(data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalYear {
    pub year: i32,
    pub statements: YearlyFinancialData,
}

/// All fiscal years supplied for one report, in caller order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawStatementStore {
    years: Vec<FiscalYear>,
}

impl RawStatementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a year, replacing (in place) any data already held for it.
    pub fn insert(&mut self, year: i32, statements: YearlyFinancialData) {
        match self.years.iter_mut().find(|fy| fy.year == year) {
            Some(existing) => existing.statements = statements,
            None => self.years.push(FiscalYear { year, statements }),
        }
    }

    pub fn with_year(mut self, year: i32, statements: YearlyFinancialData) -> Self {
        self.insert(year, statements);
        self
    }

    pub fn remove(&mut self, year: i32) -> Option<YearlyFinancialData> {
        let idx = self.years.iter().position(|fy| fy.year == year)?;
        Some(self.years.remove(idx).statements)
    }

    pub fn get(&self, year: i32) -> Option<&YearlyFinancialData> {
        self.years
            .iter()
            .find(|fy| fy.year == year)
            .map(|fy| &fy.statements)
    }

    pub fn years(&self) -> Vec<i32> {
        self.years.iter().map(|fy| fy.year).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FiscalYear> {
        self.years.iter()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Company profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub company_name: Option<String>,
    pub social_credit_code: Option<String>,
    /// Ten-thousand currency units.
    pub registered_capital: Option<f64>,
    pub establishment_date: Option<NaiveDate>,
    pub industry_category: Option<String>,
    pub legal_representative: Option<String>,
}
