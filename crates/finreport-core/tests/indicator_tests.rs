use finreport_core::indicators::{analyze_indicators, IndicatorCalculator};
use finreport_core::safe_math::{safe_ratio, PERCENT};
use finreport_core::{
    calculate_all_indicators, EngineConfig, Field, Indicator, RawStatementStore,
    YearlyFinancialData,
};
use pretty_assertions::assert_eq;

// ===========================================================================
// Fixtures
// ===========================================================================

fn year_2023() -> YearlyFinancialData {
    YearlyFinancialData::new()
        .with(Field::TotalAssets, 10_000_000.0)
        .with(Field::CurrentAssets, 6_000_000.0)
        .with(Field::NonCurrentAssets, 4_000_000.0)
        .with(Field::TotalLiabilities, 6_000_000.0)
        .with(Field::CurrentLiabilities, 4_000_000.0)
        .with(Field::NonCurrentLiabilities, 2_000_000.0)
        .with(Field::OwnersEquity, 4_000_000.0)
        .with(Field::OperatingRevenue, 10_000_000.0)
        .with(Field::OperatingCosts, 8_000_000.0)
        .with(Field::OperatingProfit, 1_200_000.0)
        .with(Field::TotalProfit, 1_150_000.0)
        .with(Field::NetProfit, 900_000.0)
        .with(Field::OperatingCashFlow, 123_456.78)
        .with(Field::InvestingCashFlow, -50_000.0)
        .with(Field::FinancingCashFlow, 20_000.0)
        .with(Field::NetCashIncrease, 93_456.78)
}

fn year_2022() -> YearlyFinancialData {
    YearlyFinancialData::new()
        .with(Field::TotalAssets, 9_000_000.0)
        .with(Field::CurrentAssets, 5_000_000.0)
        .with(Field::TotalLiabilities, 5_850_000.0)
        .with(Field::CurrentLiabilities, 4_000_000.0)
        .with(Field::OwnersEquity, 3_150_000.0)
        .with(Field::OperatingRevenue, 8_000_000.0)
        .with(Field::OperatingCosts, 6_600_000.0)
        .with(Field::NetProfit, 400_000.0)
        .with(Field::OperatingCashFlow, 300_000.0)
}

fn two_year_store() -> RawStatementStore {
    RawStatementStore::new()
        .with_year(2023, year_2023())
        .with_year(2022, year_2022())
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_missing_numerator_propagates() {
    let store = RawStatementStore::new().with_year(
        2023,
        YearlyFinancialData::new().with(Field::OperatingRevenue, 100.0),
    );
    let all = calculate_all_indicators(&store);
    assert_eq!(all.get(2023).unwrap().get(Indicator::NetProfitMargin), None);
}

#[test]
fn test_zero_denominator_is_missing() {
    assert_eq!(safe_ratio(Some(50.0), Some(0.0), PERCENT), None);
}

#[test]
fn test_rounding_two_places() {
    assert_eq!(safe_ratio(Some(33.333), Some(100.0), PERCENT), Some(33.33));
}

#[test]
fn test_percentage_scale() {
    let store = RawStatementStore::new().with_year(
        2023,
        YearlyFinancialData::new()
            .with(Field::NetProfit, 900_000.0)
            .with(Field::OperatingRevenue, 10_000_000.0),
    );
    let all = calculate_all_indicators(&store);
    assert_eq!(all.get(2023).unwrap().profitability.net_profit_margin, Some(9.0));
}

#[test]
fn test_cash_flow_pass_through_unchanged() {
    let all = calculate_all_indicators(&two_year_store());
    let cash = &all.get(2023).unwrap().cash_flow;
    assert_eq!(cash.operating_cash_flow, Some(123_456.78));
    assert_eq!(cash.net_cash_increase, Some(93_456.78));
}

#[test]
fn test_repeated_runs_identical() {
    let store = two_year_store();
    let first = calculate_all_indicators(&store);
    let second = calculate_all_indicators(&store);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_years_are_independent() {
    let full = calculate_all_indicators(&two_year_store());

    let mut without_2022 = two_year_store();
    without_2022.remove(2022);
    let partial = calculate_all_indicators(&without_2022);
    assert_eq!(full.get(2023), partial.get(2023));

    let mut altered = two_year_store();
    altered.insert(2022, YearlyFinancialData::new().with(Field::NetProfit, -1.0));
    let altered = calculate_all_indicators(&altered);
    assert_eq!(full.get(2023), altered.get(2023));
    assert_ne!(full.get(2022), altered.get(2022));
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_solvency_scenario() {
    let store = RawStatementStore::new().with_year(
        2023,
        YearlyFinancialData::new()
            .with(Field::TotalAssets, 10_000_000.0)
            .with(Field::TotalLiabilities, 6_000_000.0)
            .with(Field::CurrentAssets, 6_000_000.0)
            .with(Field::CurrentLiabilities, 4_000_000.0),
    );
    let all = calculate_all_indicators(&store);
    let solvency = &all.get(2023).unwrap().solvency;
    assert_eq!(solvency.debt_to_asset_ratio, Some(60.0));
    assert_eq!(solvency.current_ratio, Some(1.5));
    assert_eq!(solvency.quick_ratio, Some(1.2));
}

#[test]
fn test_missing_revenue_scenario() {
    let mut data = year_2023();
    data.set(Field::OperatingRevenue, None);
    let store = RawStatementStore::new().with_year(2023, data);
    let y = calculate_all_indicators(&store).get(2023).cloned().unwrap();

    assert_eq!(y.get(Indicator::NetProfitMargin), None);
    assert_eq!(y.get(Indicator::GrossProfitMargin), None);
    assert_eq!(y.get(Indicator::TotalAssetTurnover), None);
    assert_eq!(y.get(Indicator::ReceivablesTurnover), None);

    assert_eq!(y.get(Indicator::DebtToAssetRatio), Some(60.0));
    assert_eq!(y.get(Indicator::CurrentRatio), Some(1.5));
    assert_eq!(y.get(Indicator::QuickRatio), Some(1.2));
}

#[test]
fn test_full_two_year_run() {
    let all = calculate_all_indicators(&two_year_store());
    assert_eq!(all.years(), vec![2023, 2022]);

    let y = all.get(2023).unwrap();
    assert_eq!(y.profitability.gross_profit_margin, Some(20.0));
    assert_eq!(y.profitability.return_on_equity, Some(22.5));
    // 10m / (6m * 0.3) = 5.555...
    assert_eq!(y.operations.receivables_turnover, Some(5.56));
    // 8m / (6m * 0.2) = 6.666...
    assert_eq!(y.operations.inventory_turnover, Some(6.67));
    assert_eq!(y.operations.total_asset_turnover, Some(1.0));
    // 123_456.78 / 900_000 = 0.137...
    assert_eq!(y.cash_flow.cash_to_profit_ratio, Some(0.14));

    let p = all.get(2022).unwrap();
    assert_eq!(p.solvency.debt_to_asset_ratio, Some(65.0));
    assert_eq!(p.profitability.net_profit_margin, Some(5.0));
    assert_eq!(p.cash_flow.net_cash_increase, None);
}

#[test]
fn test_requested_absent_year() {
    let store = two_year_store();
    let all = IndicatorCalculator::new(&store).calculate_years(&[2023, 2020]);
    let absent = all.get(2020).unwrap();
    for indicator in Indicator::ALL {
        assert_eq!(absent.get(indicator), None, "{indicator} should be missing");
    }
}

#[test]
fn test_analyze_envelope() {
    let output = analyze_indicators(&two_year_store(), None, &EngineConfig::default());
    assert_eq!(output.result.years(), vec![2023, 2022]);
    assert!(output
        .warnings
        .iter()
        .any(|w| w.starts_with("2022:") && w.contains("net_cash_increase")));
    assert_eq!(output.metadata.precision, "f64_rounded_2dp");
    assert!(!output.methodology.is_empty());
}
