//! Rule-based risk grading per dimension.
//!
//! Used when no narrative model is available. Each dimension is graded on
//! one driving indicator; the overall rating counts graded dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::indicators::{Dimension, Indicator, YearIndicators};

const LOSS_THRESHOLD: f64 = 0.0;
const THIN_MARGIN_PCT: f64 = 5.0;
const HIGH_LEVERAGE_PCT: f64 = 70.0;
const MODERATE_LEVERAGE_PCT: f64 = 50.0;
const SLOW_ASSET_TURNOVER: f64 = 0.5;
const WEAK_CASH_CONVERSION: f64 = 0.8;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// Every indicator of the dimension is missing.
    Undetermined,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Undetermined => "undetermined",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finding {
    LossMaking,
    ThinMargin,
    HealthyProfitability,
    HighLeverage,
    ModerateLeverage,
    HealthyLeverage,
    SlowAssetTurnover,
    EfficientAssetTurnover,
    NegativeOperatingCashFlow,
    WeakCashConversion,
    SoundCashFlow,
    InsufficientData,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LossMaking => "Net loss for the year",
            Self::ThinMargin => "Net profit margin below 5%",
            Self::HealthyProfitability => "Profitability in good shape",
            Self::HighLeverage => "Debt-to-asset ratio above 70%",
            Self::ModerateLeverage => "Debt-to-asset ratio above 50%",
            Self::HealthyLeverage => "Leverage at a healthy level",
            Self::SlowAssetTurnover => "Total asset turnover below 0.5",
            Self::EfficientAssetTurnover => "Assets turned over efficiently",
            Self::NegativeOperatingCashFlow => "Negative operating cash flow",
            Self::WeakCashConversion => "Operating cash flow below 0.8x net profit",
            Self::SoundCashFlow => "Cash flow is sound",
            Self::InsufficientData => "Key figures missing; dimension cannot be graded",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAssessment {
    pub dimension: Dimension,
    pub level: RiskLevel,
    pub findings: Vec<Finding>,
    /// False when any indicator of the dimension is missing.
    pub complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallRating {
    Good,
    Stable,
    HighRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    pub rating: OverallRating,
    pub high_count: usize,
    pub low_count: usize,
    /// Dimensions graded high.
    pub attention: Vec<Dimension>,
    /// Dimensions graded low.
    pub strengths: Vec<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub year: i32,
    pub dimensions: Vec<DimensionAssessment>,
    pub overall: OverallAssessment,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn assess_dimension(year: &YearIndicators, dimension: Dimension) -> DimensionAssessment {
    let values = year.dimension(dimension);
    let present = values.iter().filter(|(_, v)| v.is_some()).count();

    if present == 0 {
        return DimensionAssessment {
            dimension,
            level: RiskLevel::Undetermined,
            findings: vec![Finding::InsufficientData],
            complete: false,
        };
    }

    let (level, finding) = match dimension {
        Dimension::Profitability => grade_profitability(year),
        Dimension::Solvency => grade_solvency(year),
        Dimension::Operations => grade_operations(year),
        Dimension::CashFlow => grade_cash_flow(year),
    };

    DimensionAssessment {
        dimension,
        level,
        findings: finding.into_iter().collect(),
        complete: present == values.len(),
    }
}

pub fn assess_overall(assessments: &[DimensionAssessment]) -> OverallAssessment {
    let with_level = |level: RiskLevel| -> Vec<Dimension> {
        assessments
            .iter()
            .filter(|a| a.level == level)
            .map(|a| a.dimension)
            .collect()
    };
    let attention = with_level(RiskLevel::High);
    let strengths = with_level(RiskLevel::Low);

    let rating = if attention.len() >= 2 {
        OverallRating::HighRisk
    } else if strengths.len() >= 3 {
        OverallRating::Good
    } else {
        OverallRating::Stable
    };

    OverallAssessment {
        rating,
        high_count: attention.len(),
        low_count: strengths.len(),
        attention,
        strengths,
    }
}

/// Grade all four dimensions of one year.
pub fn assess_year(year: &YearIndicators) -> RiskReport {
    let dimensions: Vec<DimensionAssessment> = Dimension::ALL
        .into_iter()
        .map(|dimension| assess_dimension(year, dimension))
        .collect();
    let overall = assess_overall(&dimensions);
    RiskReport {
        year: year.year,
        dimensions,
        overall,
    }
}

// ---------------------------------------------------------------------------
// Grading rules
// ---------------------------------------------------------------------------

fn grade_profitability(year: &YearIndicators) -> (RiskLevel, Option<Finding>) {
    match year.get(Indicator::NetProfitMargin) {
        Some(m) if m < LOSS_THRESHOLD => (RiskLevel::High, Some(Finding::LossMaking)),
        Some(m) if m < THIN_MARGIN_PCT => (RiskLevel::Medium, Some(Finding::ThinMargin)),
        Some(_) => (RiskLevel::Low, Some(Finding::HealthyProfitability)),
        None => (RiskLevel::Medium, None),
    }
}

fn grade_solvency(year: &YearIndicators) -> (RiskLevel, Option<Finding>) {
    match year.get(Indicator::DebtToAssetRatio) {
        Some(d) if d > HIGH_LEVERAGE_PCT => (RiskLevel::High, Some(Finding::HighLeverage)),
        Some(d) if d > MODERATE_LEVERAGE_PCT => {
            (RiskLevel::Medium, Some(Finding::ModerateLeverage))
        }
        Some(_) => (RiskLevel::Low, Some(Finding::HealthyLeverage)),
        None => (RiskLevel::Medium, None),
    }
}

fn grade_operations(year: &YearIndicators) -> (RiskLevel, Option<Finding>) {
    match year.get(Indicator::TotalAssetTurnover) {
        Some(t) if t < SLOW_ASSET_TURNOVER => (RiskLevel::Medium, Some(Finding::SlowAssetTurnover)),
        Some(_) => (RiskLevel::Low, Some(Finding::EfficientAssetTurnover)),
        None => (RiskLevel::Medium, None),
    }
}

fn grade_cash_flow(year: &YearIndicators) -> (RiskLevel, Option<Finding>) {
    let ocf = year.get(Indicator::OperatingCashFlow);
    let conversion = year.get(Indicator::CashToProfitRatio);
    match (ocf, conversion) {
        (Some(o), _) if o < 0.0 => (RiskLevel::High, Some(Finding::NegativeOperatingCashFlow)),
        (_, Some(c)) if c < WEAK_CASH_CONVERSION => {
            (RiskLevel::Medium, Some(Finding::WeakCashConversion))
        }
        _ => (RiskLevel::Low, Some(Finding::SoundCashFlow)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year() -> YearIndicators {
        YearIndicators::missing(2023)
    }

    #[test]
    fn test_all_missing_is_undetermined() {
        let a = assess_dimension(&year(), Dimension::Solvency);
        assert_eq!(a.level, RiskLevel::Undetermined);
        assert_eq!(a.findings, vec![Finding::InsufficientData]);
        assert!(!a.complete);
    }

    #[test]
    fn test_profitability_bands() {
        let mut y = year();
        y.profitability.net_profit_margin = Some(-1.0);
        assert_eq!(assess_dimension(&y, Dimension::Profitability).level, RiskLevel::High);
        y.profitability.net_profit_margin = Some(4.99);
        assert_eq!(assess_dimension(&y, Dimension::Profitability).level, RiskLevel::Medium);
        y.profitability.net_profit_margin = Some(5.0);
        assert_eq!(assess_dimension(&y, Dimension::Profitability).level, RiskLevel::Low);
    }

    #[test]
    fn test_missing_driver_defaults_to_medium() {
        let mut y = year();
        y.profitability.return_on_equity = Some(12.0);
        let a = assess_dimension(&y, Dimension::Profitability);
        assert_eq!(a.level, RiskLevel::Medium);
        assert!(a.findings.is_empty());
        assert!(!a.complete);
    }

    #[test]
    fn test_solvency_bands() {
        let mut y = year();
        y.solvency.debt_to_asset_ratio = Some(70.01);
        assert_eq!(assess_dimension(&y, Dimension::Solvency).level, RiskLevel::High);
        y.solvency.debt_to_asset_ratio = Some(70.0);
        assert_eq!(assess_dimension(&y, Dimension::Solvency).level, RiskLevel::Medium);
        y.solvency.debt_to_asset_ratio = Some(50.0);
        assert_eq!(assess_dimension(&y, Dimension::Solvency).level, RiskLevel::Low);
    }

    #[test]
    fn test_cash_flow_rules() {
        let mut y = year();
        y.cash_flow.operating_cash_flow = Some(-10.0);
        y.cash_flow.cash_to_profit_ratio = Some(2.0);
        assert_eq!(assess_dimension(&y, Dimension::CashFlow).level, RiskLevel::High);

        y.cash_flow.operating_cash_flow = Some(10.0);
        y.cash_flow.cash_to_profit_ratio = Some(0.5);
        assert_eq!(assess_dimension(&y, Dimension::CashFlow).level, RiskLevel::Medium);

        let mut y = year();
        y.cash_flow.net_cash_increase = Some(5.0);
        let a = assess_dimension(&y, Dimension::CashFlow);
        assert_eq!(a.level, RiskLevel::Low);
        assert_eq!(a.findings, vec![Finding::SoundCashFlow]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(RiskLevel::Undetermined.to_string(), "undetermined");
        assert_eq!(Finding::ThinMargin.to_string(), "Net profit margin below 5%");
    }

    #[test]
    fn test_overall_rating() {
        let grade = |dimension, level| DimensionAssessment {
            dimension,
            level,
            findings: vec![],
            complete: true,
        };
        let high = assess_overall(&[
            grade(Dimension::Profitability, RiskLevel::High),
            grade(Dimension::Solvency, RiskLevel::High),
            grade(Dimension::Operations, RiskLevel::Low),
            grade(Dimension::CashFlow, RiskLevel::Low),
        ]);
        assert_eq!(high.rating, OverallRating::HighRisk);
        assert_eq!(high.attention, vec![Dimension::Profitability, Dimension::Solvency]);

        let good = assess_overall(&[
            grade(Dimension::Profitability, RiskLevel::Low),
            grade(Dimension::Solvency, RiskLevel::Low),
            grade(Dimension::Operations, RiskLevel::Low),
            grade(Dimension::CashFlow, RiskLevel::Medium),
        ]);
        assert_eq!(good.rating, OverallRating::Good);
        assert_eq!(good.low_count, 3);

        let stable = assess_overall(&[
            grade(Dimension::Profitability, RiskLevel::Undetermined),
            grade(Dimension::Solvency, RiskLevel::High),
        ]);
        assert_eq!(stable.rating, OverallRating::Stable);
    }
}
