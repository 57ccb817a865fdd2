use clap::Args;
use serde_json::Value;

use finreport_core::indicators::IndicatorCalculator;
use finreport_core::risk::assess_year;
use finreport_core::EngineConfig;

use super::InputArgs;
use crate::input;

/// Arguments for rule-based risk grading
#[derive(Args)]
pub struct RiskArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Grade this year instead of the most recent one
    #[arg(long)]
    pub year: Option<i32>,
}

pub fn run_risk(
    args: RiskArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loaded = input::load_statements(args.source.input.as_deref(), config)?;
    let year = match args.year {
        Some(year) => year,
        None => *loaded.years.first().ok_or("No fiscal years loaded")?,
    };

    let indicators = IndicatorCalculator::new(&loaded.store)
        .with_estimation(config.estimation)
        .calculate_year(year);
    let report = assess_year(&indicators);

    Ok(serde_json::json!({
        "result": report,
        "warnings": loaded.warnings,
        "methodology": "Rule-based grading on one driving indicator per dimension",
    }))
}
