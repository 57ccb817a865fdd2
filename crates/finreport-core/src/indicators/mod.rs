//! Per-year financial indicators grouped into four risk dimensions.
//!
//! Each year is computed independently from its own statements. A year that
//! was requested but never supplied yields indicators that are all missing.

pub mod cash_flow;
pub mod operations;
pub mod profitability;
pub mod solvency;

use serde::de::{self, MapAccess, Unexpected, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::{EngineConfig, EstimationRatios};
use crate::statements::{RawStatementStore, YearlyFinancialData};
use crate::types::{with_metadata, ComputationOutput, Figure};

pub use cash_flow::CashFlowIndicators;
pub use operations::OperationsIndicators;
pub use profitability::ProfitabilityIndicators;
pub use solvency::SolvencyIndicators;

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Profitability,
    Solvency,
    Operations,
    CashFlow,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Profitability,
        Dimension::Solvency,
        Dimension::Operations,
        Dimension::CashFlow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Profitability => "profitability",
            Self::Solvency => "solvency",
            Self::Operations => "operations",
            Self::CashFlow => "cash_flow",
        }
    }

    pub fn indicators(self) -> &'static [Indicator] {
        match self {
            Self::Profitability => &[
                Indicator::NetProfitMargin,
                Indicator::GrossProfitMargin,
                Indicator::ReturnOnEquity,
            ],
            Self::Solvency => &[
                Indicator::DebtToAssetRatio,
                Indicator::CurrentRatio,
                Indicator::QuickRatio,
            ],
            Self::Operations => &[
                Indicator::ReceivablesTurnover,
                Indicator::InventoryTurnover,
                Indicator::TotalAssetTurnover,
            ],
            Self::CashFlow => &[
                Indicator::CashToProfitRatio,
                Indicator::OperatingCashFlow,
                Indicator::NetCashIncrease,
            ],
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How an indicator value is read and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Already multiplied by 100.
    Percent,
    Ratio,
    /// Pass-through amount in ten-thousand currency units.
    TenThousandCurrency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    NetProfitMargin,
    GrossProfitMargin,
    ReturnOnEquity,
    DebtToAssetRatio,
    CurrentRatio,
    QuickRatio,
    ReceivablesTurnover,
    InventoryTurnover,
    TotalAssetTurnover,
    CashToProfitRatio,
    OperatingCashFlow,
    NetCashIncrease,
}

impl Indicator {
    pub const ALL: [Indicator; 12] = [
        Indicator::NetProfitMargin,
        Indicator::GrossProfitMargin,
        Indicator::ReturnOnEquity,
        Indicator::DebtToAssetRatio,
        Indicator::CurrentRatio,
        Indicator::QuickRatio,
        Indicator::ReceivablesTurnover,
        Indicator::InventoryTurnover,
        Indicator::TotalAssetTurnover,
        Indicator::CashToProfitRatio,
        Indicator::OperatingCashFlow,
        Indicator::NetCashIncrease,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::NetProfitMargin => "net_profit_margin",
            Self::GrossProfitMargin => "gross_profit_margin",
            Self::ReturnOnEquity => "return_on_equity",
            Self::DebtToAssetRatio => "debt_to_asset_ratio",
            Self::CurrentRatio => "current_ratio",
            Self::QuickRatio => "quick_ratio",
            Self::ReceivablesTurnover => "receivables_turnover",
            Self::InventoryTurnover => "inventory_turnover",
            Self::TotalAssetTurnover => "total_asset_turnover",
            Self::CashToProfitRatio => "cash_to_profit_ratio",
            Self::OperatingCashFlow => "operating_cash_flow",
            Self::NetCashIncrease => "net_cash_increase",
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            Self::NetProfitMargin | Self::GrossProfitMargin | Self::ReturnOnEquity => {
                Dimension::Profitability
            }
            Self::DebtToAssetRatio | Self::CurrentRatio | Self::QuickRatio => Dimension::Solvency,
            Self::ReceivablesTurnover | Self::InventoryTurnover | Self::TotalAssetTurnover => {
                Dimension::Operations
            }
            Self::CashToProfitRatio | Self::OperatingCashFlow | Self::NetCashIncrease => {
                Dimension::CashFlow
            }
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            Self::NetProfitMargin
            | Self::GrossProfitMargin
            | Self::ReturnOnEquity
            | Self::DebtToAssetRatio => Unit::Percent,
            Self::OperatingCashFlow | Self::NetCashIncrease => Unit::TenThousandCurrency,
            _ => Unit::Ratio,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// All four dimension groups for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearIndicators {
    pub year: i32,
    pub profitability: ProfitabilityIndicators,
    pub solvency: SolvencyIndicators,
    pub operations: OperationsIndicators,
    pub cash_flow: CashFlowIndicators,
}

impl YearIndicators {
    /// Every indicator missing.
    pub fn missing(year: i32) -> Self {
        Self {
            year,
            profitability: ProfitabilityIndicators::default(),
            solvency: SolvencyIndicators::default(),
            operations: OperationsIndicators::default(),
            cash_flow: CashFlowIndicators::default(),
        }
    }

    pub fn get(&self, indicator: Indicator) -> Figure {
        match indicator {
            Indicator::NetProfitMargin => self.profitability.net_profit_margin,
            Indicator::GrossProfitMargin => self.profitability.gross_profit_margin,
            Indicator::ReturnOnEquity => self.profitability.return_on_equity,
            Indicator::DebtToAssetRatio => self.solvency.debt_to_asset_ratio,
            Indicator::CurrentRatio => self.solvency.current_ratio,
            Indicator::QuickRatio => self.solvency.quick_ratio,
            Indicator::ReceivablesTurnover => self.operations.receivables_turnover,
            Indicator::InventoryTurnover => self.operations.inventory_turnover,
            Indicator::TotalAssetTurnover => self.operations.total_asset_turnover,
            Indicator::CashToProfitRatio => self.cash_flow.cash_to_profit_ratio,
            Indicator::OperatingCashFlow => self.cash_flow.operating_cash_flow,
            Indicator::NetCashIncrease => self.cash_flow.net_cash_increase,
        }
    }

    /// The indicator values of one dimension, in display order.
    pub fn dimension(&self, dimension: Dimension) -> Vec<(Indicator, Figure)> {
        dimension
            .indicators()
            .iter()
            .map(|&indicator| (indicator, self.get(indicator)))
            .collect()
    }

    pub fn missing_indicators(&self) -> Vec<Indicator> {
        Indicator::ALL
            .into_iter()
            .filter(|&indicator| self.get(indicator).is_none())
            .collect()
    }
}

/// year -> dimension -> indicator values, in the order years were requested.
///
/// Serializes as a JSON object keyed by year and reads the same shape back,
/// keeping document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllIndicators {
    years: Vec<YearIndicators>,
}

impl AllIndicators {
    pub fn get(&self, year: i32) -> Option<&YearIndicators> {
        self.years.iter().find(|y| y.year == year)
    }

    pub fn years(&self) -> Vec<i32> {
        self.years.iter().map(|y| y.year).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &YearIndicators> {
        self.years.iter()
    }

    /// The first year in caller order; by convention the most recent.
    pub fn latest(&self) -> Option<&YearIndicators> {
        self.years.first()
    }

    /// The year following `latest` in caller order.
    pub fn previous(&self) -> Option<&YearIndicators> {
        self.years.get(1)
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl Serialize for AllIndicators {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.years.len()))?;
        for year in &self.years {
            map.serialize_entry(
                &year.year.to_string(),
                &DimensionsView {
                    profitability: &year.profitability,
                    solvency: &year.solvency,
                    operations: &year.operations,
                    cash_flow: &year.cash_flow,
                },
            )?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct DimensionsView<'a> {
    profitability: &'a ProfitabilityIndicators,
    solvency: &'a SolvencyIndicators,
    operations: &'a OperationsIndicators,
    cash_flow: &'a CashFlowIndicators,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct OwnedDimensions {
    profitability: ProfitabilityIndicators,
    solvency: SolvencyIndicators,
    operations: OperationsIndicators,
    cash_flow: CashFlowIndicators,
}

impl<'de> Deserialize<'de> for AllIndicators {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(YearMapVisitor)
    }
}

struct YearMapVisitor;

impl<'de> Visitor<'de> for YearMapVisitor {
    type Value = AllIndicators;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map keyed by fiscal year")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut years: Vec<YearIndicators> = Vec::new();
        while let Some((key, dims)) = access.next_entry::<String, OwnedDimensions>()? {
            let year: i32 = key
                .parse()
                .map_err(|_| de::Error::invalid_value(Unexpected::Str(&key), &"a fiscal year"))?;
            let entry = YearIndicators {
                year,
                profitability: dims.profitability,
                solvency: dims.solvency,
                operations: dims.operations,
                cash_flow: dims.cash_flow,
            };
            match years.iter_mut().find(|y| y.year == year) {
                Some(existing) => *existing = entry,
                None => years.push(entry),
            }
        }
        Ok(AllIndicators { years })
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Reads a statement store and computes indicators; holds no other state.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorCalculator<'a> {
    store: &'a RawStatementStore,
    estimation: EstimationRatios,
}

impl<'a> IndicatorCalculator<'a> {
    pub fn new(store: &'a RawStatementStore) -> Self {
        Self {
            store,
            estimation: EstimationRatios::default(),
        }
    }

    pub fn with_estimation(mut self, estimation: EstimationRatios) -> Self {
        self.estimation = estimation;
        self
    }

    pub fn calculate_year(&self, year: i32) -> YearIndicators {
        match self.store.get(year) {
            Some(data) => {
                debug!(year, fields = data.present_count(), "computing indicators");
                compute_year(year, data, &self.estimation)
            }
            None => {
                warn!(year, "no statements supplied; all indicators missing");
                YearIndicators::missing(year)
            }
        }
    }

    pub fn calculate_years(&self, years: &[i32]) -> AllIndicators {
        AllIndicators {
            years: years.iter().map(|&year| self.calculate_year(year)).collect(),
        }
    }

    /// Every year in the store, in store order.
    pub fn calculate_all(&self) -> AllIndicators {
        AllIndicators {
            years: self
                .store
                .iter()
                .map(|fy| compute_year(fy.year, &fy.statements, &self.estimation))
                .collect(),
        }
    }
}

fn compute_year(
    year: i32,
    data: &YearlyFinancialData,
    estimation: &EstimationRatios,
) -> YearIndicators {
    YearIndicators {
        year,
        profitability: profitability::calculate(data),
        solvency: solvency::calculate(data, estimation),
        operations: operations::calculate(data, estimation),
        cash_flow: cash_flow::calculate(data),
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Indicators for every year in the store using the stock estimation shares.
pub fn calculate_all_indicators(store: &RawStatementStore) -> AllIndicators {
    IndicatorCalculator::new(store).calculate_all()
}

/// Compute indicators and wrap them with assumptions and missing-data
/// warnings. `years` restricts (and orders) the output; `None` means every
/// year in the store.
pub fn analyze_indicators(
    store: &RawStatementStore,
    years: Option<&[i32]>,
    config: &EngineConfig,
) -> ComputationOutput<AllIndicators> {
    let start = Instant::now();
    let calculator = IndicatorCalculator::new(store).with_estimation(config.estimation);

    let all = match years {
        Some(years) => calculator.calculate_years(years),
        None => calculator.calculate_all(),
    };

    let mut warnings = Vec::new();
    for year in all.iter() {
        if store.get(year.year).is_none() {
            warnings.push(format!(
                "No statements supplied for {}; all indicators are missing.",
                year.year
            ));
            continue;
        }
        let missing = year.missing_indicators();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|i| i.name()).collect();
            warnings.push(format!("{}: data missing for {}.", year.year, names.join(", ")));
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "quick_assets": format!("current_assets * {}", config.estimation.quick_asset_share),
        "receivables": format!("current_assets * {}", config.estimation.receivables_share),
        "inventory": format!("current_assets * {}", config.estimation.inventory_share),
        "turnover_basis": "period-end balances",
        "percent_scale": "margins, ROE and debt ratio multiplied by 100",
        "rounding": "2 decimal places, half-even",
    });

    with_metadata(
        "Statement ratio analysis (profitability, solvency, operations, cash flow)",
        &assumptions,
        warnings,
        elapsed,
        all,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::Field;

    fn sample_store() -> RawStatementStore {
        RawStatementStore::new()
            .with_year(
                2023,
                YearlyFinancialData::new()
                    .with(Field::TotalAssets, 10_000_000.0)
                    .with(Field::TotalLiabilities, 6_000_000.0)
                    .with(Field::CurrentAssets, 6_000_000.0)
                    .with(Field::CurrentLiabilities, 4_000_000.0)
                    .with(Field::OwnersEquity, 4_000_000.0)
                    .with(Field::OperatingRevenue, 10_000_000.0)
                    .with(Field::OperatingCosts, 7_000_000.0)
                    .with(Field::NetProfit, 900_000.0)
                    .with(Field::OperatingCashFlow, 1_080_000.0)
                    .with(Field::NetCashIncrease, 250_000.0),
            )
            .with_year(
                2022,
                YearlyFinancialData::new()
                    .with(Field::TotalAssets, 9_000_000.0)
                    .with(Field::NetProfit, 700_000.0),
            )
    }

    #[test]
    fn test_dimension_membership_matches_indicator() {
        for dimension in Dimension::ALL {
            for indicator in dimension.indicators() {
                assert_eq!(indicator.dimension(), dimension);
            }
        }
    }

    #[test]
    fn test_unit_table() {
        assert_eq!(Indicator::ReturnOnEquity.unit(), Unit::Percent);
        assert_eq!(Indicator::DebtToAssetRatio.unit(), Unit::Percent);
        assert_eq!(Indicator::QuickRatio.unit(), Unit::Ratio);
        assert_eq!(Indicator::CashToProfitRatio.unit(), Unit::Ratio);
        assert_eq!(Indicator::NetCashIncrease.unit(), Unit::TenThousandCurrency);
    }

    #[test]
    fn test_full_year() {
        let store = sample_store();
        let all = calculate_all_indicators(&store);
        let y = all.get(2023).unwrap();
        assert_eq!(y.profitability.net_profit_margin, Some(9.0));
        assert_eq!(y.profitability.gross_profit_margin, Some(30.0));
        assert_eq!(y.profitability.return_on_equity, Some(22.5));
        assert_eq!(y.solvency.debt_to_asset_ratio, Some(60.0));
        assert_eq!(y.operations.total_asset_turnover, Some(1.0));
        assert_eq!(y.cash_flow.cash_to_profit_ratio, Some(1.2));
    }

    #[test]
    fn test_absent_year_all_missing() {
        let store = sample_store();
        let all = IndicatorCalculator::new(&store).calculate_years(&[2021]);
        let y = all.get(2021).unwrap();
        assert_eq!(y, &YearIndicators::missing(2021));
        assert_eq!(y.missing_indicators().len(), Indicator::ALL.len());
    }

    #[test]
    fn test_caller_order_preserved() {
        let store = sample_store();
        let calculator = IndicatorCalculator::new(&store);
        assert_eq!(calculator.calculate_all().years(), vec![2023, 2022]);
        assert_eq!(calculator.calculate_years(&[2022, 2023]).years(), vec![2022, 2023]);
        assert_eq!(calculator.calculate_all().latest().unwrap().year, 2023);
        assert_eq!(calculator.calculate_all().previous().unwrap().year, 2022);
    }

    #[test]
    fn test_serializes_as_year_keyed_map() {
        let all = calculate_all_indicators(&sample_store());
        let value = serde_json::to_value(&all).unwrap();
        assert_eq!(value["2023"]["profitability"]["net_profit_margin"], 9.0);
        assert!(value["2022"]["solvency"]["current_ratio"].is_null());
    }

    #[test]
    fn test_reads_year_keyed_map_in_document_order() {
        let json = r#"{
            "2022": {"solvency": {"current_ratio": 1.5}},
            "2023": {
                "profitability": {"net_profit_margin": 9.0, "return_on_equity": null},
                "cash_flow": {"operating_cash_flow": -20.0}
            }
        }"#;
        let all: AllIndicators = serde_json::from_str(json).unwrap();
        assert_eq!(all.years(), vec![2022, 2023]);
        assert_eq!(all.get(2022).unwrap().get(Indicator::CurrentRatio), Some(1.5));
        assert_eq!(all.get(2022).unwrap().get(Indicator::NetProfitMargin), None);
        let y = all.get(2023).unwrap();
        assert_eq!(y.get(Indicator::NetProfitMargin), Some(9.0));
        assert_eq!(y.get(Indicator::ReturnOnEquity), None);
        assert_eq!(y.get(Indicator::OperatingCashFlow), Some(-20.0));

        let written = serde_json::to_string(&calculate_all_indicators(&sample_store())).unwrap();
        let read: AllIndicators = serde_json::from_str(&written).unwrap();
        assert_eq!(read, calculate_all_indicators(&sample_store()));
    }

    #[test]
    fn test_non_year_key_rejected() {
        assert!(serde_json::from_str::<AllIndicators>(r#"{"latest": {}}"#).is_err());
    }

    #[test]
    fn test_analyze_reports_missing_and_absent_years() {
        let store = sample_store();
        let output = analyze_indicators(&store, Some(&[2023, 2021][..]), &EngineConfig::default());
        assert_eq!(output.result.years(), vec![2023, 2021]);
        assert!(output
            .warnings
            .iter()
            .any(|w| w.starts_with("No statements supplied for 2021")));
        assert!(!output.warnings.iter().any(|w| w.starts_with("2023:")));
        assert_eq!(output.assumptions["turnover_basis"], "period-end balances");
    }
}
