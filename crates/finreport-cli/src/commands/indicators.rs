use clap::Args;
use serde_json::Value;

use finreport_core::indicators::{analyze_indicators, IndicatorCalculator};
use finreport_core::trend::latest_comparison;
use finreport_core::EngineConfig;

use super::InputArgs;
use crate::input;

/// Arguments for indicator calculation
#[derive(Args)]
pub struct IndicatorsArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Years to report, in output order (defaults to every loaded year,
    /// most recent first)
    #[arg(long, value_delimiter = ',')]
    pub years: Vec<i32>,
}

/// Arguments for the year-over-year comparison
#[derive(Args)]
pub struct TrendsArgs {
    #[command(flatten)]
    pub source: InputArgs,
}

pub fn run_indicators(
    args: IndicatorsArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loaded = input::load_statements(args.source.input.as_deref(), config)?;
    let years = if args.years.is_empty() {
        loaded.years.clone()
    } else {
        args.years
    };

    let mut output = analyze_indicators(&loaded.store, Some(years.as_slice()), config);
    let mut warnings = loaded.warnings;
    warnings.append(&mut output.warnings);
    output.warnings = warnings;
    Ok(serde_json::to_value(output)?)
}

pub fn run_trends(
    args: TrendsArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loaded = input::load_statements(args.source.input.as_deref(), config)?;
    let all = IndicatorCalculator::new(&loaded.store)
        .with_estimation(config.estimation)
        .calculate_years(&loaded.years);

    let comparison = latest_comparison(&all)
        .ok_or("Trend comparison needs at least two fiscal years")?;
    Ok(serde_json::to_value(comparison.trends)?)
}
