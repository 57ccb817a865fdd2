//! Value-plus-unit rendering and chart series for downstream exporters.

use serde::{Deserialize, Serialize};

use crate::indicators::{AllIndicators, Dimension, Indicator, Unit, YearIndicators};
use crate::types::Figure;

/// Rendered in place of any missing value.
pub const DATA_MISSING: &str = "[data missing]";

pub fn unit_suffix(unit: Unit) -> &'static str {
    match unit {
        Unit::Percent => "%",
        Unit::Ratio => "",
        Unit::TenThousandCurrency => " (10k)",
    }
}

pub fn format_value(unit: Unit, value: Figure) -> String {
    match (unit, value) {
        (_, None) => DATA_MISSING.to_string(),
        (Unit::Percent, Some(v)) => format!("{v:.2}%"),
        (Unit::Ratio, Some(v)) => format!("{v:.2}"),
        // Pass-through amounts keep their source precision.
        (Unit::TenThousandCurrency, Some(v)) => format!("{v}{}", unit_suffix(unit)),
    }
}

pub fn format_indicator(indicator: Indicator, value: Figure) -> String {
    format_value(indicator.unit(), value)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub year: i32,
    pub dimension: Dimension,
    pub indicator: Indicator,
    pub value: Figure,
    pub unit: Unit,
    pub display: String,
}

pub fn display_rows(year: &YearIndicators) -> Vec<DisplayRow> {
    Dimension::ALL
        .into_iter()
        .flat_map(|dimension| year.dimension(dimension))
        .map(|(indicator, value)| DisplayRow {
            year: year.year,
            dimension: indicator.dimension(),
            indicator,
            value,
            unit: indicator.unit(),
            display: format_indicator(indicator, value),
        })
        .collect()
}

/// `(year, value)` points in year order; missing values are left out rather
/// than plotted as zero.
pub fn chart_series(all: &AllIndicators, indicator: Indicator) -> Vec<(i32, f64)> {
    all.iter()
        .filter_map(|year| year.get(indicator).map(|v| (year.year, v)))
        .collect()
}
