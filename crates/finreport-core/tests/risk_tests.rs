#![cfg(feature = "risk")]

use finreport_core::risk::{assess_year, Finding, OverallRating, RiskLevel};
use finreport_core::{
    calculate_all_indicators, Dimension, Field, RawStatementStore, YearlyFinancialData,
};

fn grade(data: YearlyFinancialData) -> finreport_core::risk::RiskReport {
    let store = RawStatementStore::new().with_year(2023, data);
    let all = calculate_all_indicators(&store);
    assess_year(all.get(2023).unwrap())
}

#[test]
fn test_healthy_company_is_good() {
    let report = grade(
        YearlyFinancialData::new()
            .with(Field::TotalAssets, 10_000.0)
            .with(Field::TotalLiabilities, 4_000.0)
            .with(Field::CurrentAssets, 6_000.0)
            .with(Field::CurrentLiabilities, 3_000.0)
            .with(Field::OwnersEquity, 6_000.0)
            .with(Field::OperatingRevenue, 12_000.0)
            .with(Field::OperatingCosts, 9_000.0)
            .with(Field::NetProfit, 1_200.0)
            .with(Field::OperatingCashFlow, 1_500.0)
            .with(Field::NetCashIncrease, 300.0),
    );
    assert_eq!(report.year, 2023);
    assert!(report.dimensions.iter().all(|d| d.level == RiskLevel::Low));
    assert!(report.dimensions.iter().all(|d| d.complete));
    assert_eq!(report.overall.rating, OverallRating::Good);
    assert_eq!(report.overall.low_count, 4);
}

#[test]
fn test_distressed_company_is_high_risk() {
    let report = grade(
        YearlyFinancialData::new()
            .with(Field::TotalAssets, 10_000.0)
            .with(Field::TotalLiabilities, 8_500.0)
            .with(Field::OperatingRevenue, 3_000.0)
            .with(Field::NetProfit, -400.0)
            .with(Field::OperatingCashFlow, -250.0),
    );
    let level = |dimension: Dimension| {
        report
            .dimensions
            .iter()
            .find(|d| d.dimension == dimension)
            .map(|d| d.level)
            .unwrap()
    };
    assert_eq!(level(Dimension::Profitability), RiskLevel::High);
    assert_eq!(level(Dimension::Solvency), RiskLevel::High);
    assert_eq!(level(Dimension::Operations), RiskLevel::Medium);
    assert_eq!(level(Dimension::CashFlow), RiskLevel::High);
    assert_eq!(report.overall.rating, OverallRating::HighRisk);
    assert_eq!(
        report.overall.attention,
        vec![Dimension::Profitability, Dimension::Solvency, Dimension::CashFlow]
    );
}

#[test]
fn test_empty_year_is_undetermined_and_stable() {
    let report = grade(YearlyFinancialData::new());
    assert!(report
        .dimensions
        .iter()
        .all(|d| {
            d.level == RiskLevel::Undetermined && d.findings == vec![Finding::InsufficientData]
        }));
    assert_eq!(report.overall.rating, OverallRating::Stable);
}
