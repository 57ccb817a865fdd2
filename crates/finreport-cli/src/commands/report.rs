use clap::Args;
use serde_json::{json, Value};

use finreport_core::indicators::IndicatorCalculator;
use finreport_core::narration::build_briefs;
use finreport_core::presentation::{chart_series, display_rows};
use finreport_core::risk::assess_year;
use finreport_core::trend::latest_comparison;
use finreport_core::{EngineConfig, Indicator};

use super::InputArgs;
use crate::input;

/// Arguments for narration briefs
#[derive(Args)]
pub struct BriefArgs {
    #[command(flatten)]
    pub source: InputArgs,
}

/// Arguments for the full report document
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: InputArgs,
}

pub fn run_brief(
    args: BriefArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loaded = input::load_statements(args.source.input.as_deref(), config)?;
    let all = IndicatorCalculator::new(&loaded.store)
        .with_estimation(config.estimation)
        .calculate_years(&loaded.years);

    Ok(serde_json::to_value(build_briefs(&all, Some(&loaded.profile)))?)
}

pub fn run_report(
    args: ReportArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loaded = input::load_statements(args.source.input.as_deref(), config)?;
    let all = IndicatorCalculator::new(&loaded.store)
        .with_estimation(config.estimation)
        .calculate_years(&loaded.years);

    let display: Vec<_> = all.iter().flat_map(display_rows).collect();
    let charts: serde_json::Map<String, Value> = Indicator::ALL
        .into_iter()
        .map(|indicator| {
            let points: Vec<Value> = chart_series(&all, indicator)
                .into_iter()
                .map(|(year, value)| json!({"year": year, "value": value}))
                .collect();
            (indicator.name().to_string(), Value::Array(points))
        })
        .collect();

    Ok(json!({
        "result": {
            "company": loaded.profile,
            "years": loaded.years,
            "indicators": all,
            "display": display,
            "charts": charts,
            "trends": latest_comparison(&all),
            "risk": all.latest().map(assess_year),
            "briefs": build_briefs(&all, Some(&loaded.profile)),
        },
        "warnings": loaded.warnings,
        "methodology": "Statement ratio analysis with rule-based risk grading",
    }))
}
