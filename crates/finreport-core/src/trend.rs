//! Year-over-year direction of each indicator.
//!
//! A direction is only claimed when both years carry a value.

use serde::{Deserialize, Serialize};

use crate::indicators::{AllIndicators, Dimension, Indicator, YearIndicators};
use crate::safe_math::round_dp2;
use crate::types::Figure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Falling,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorTrend {
    pub indicator: Indicator,
    pub current: Figure,
    pub previous: Figure,
    pub change: Figure,
    pub direction: Option<TrendDirection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearComparison {
    pub current_year: i32,
    pub previous_year: i32,
    pub trends: Vec<IndicatorTrend>,
}

pub fn trend_of(indicator: Indicator, current: Figure, previous: Figure) -> IndicatorTrend {
    let delta = current.zip(previous).map(|(c, p)| c - p);
    let direction = delta.map(|d| {
        if d > 0.0 {
            TrendDirection::Rising
        } else if d < 0.0 {
            TrendDirection::Falling
        } else {
            TrendDirection::Flat
        }
    });
    IndicatorTrend {
        indicator,
        current,
        previous,
        change: delta.and_then(round_dp2),
        direction,
    }
}

pub fn compare_dimension(
    current: &YearIndicators,
    previous: &YearIndicators,
    dimension: Dimension,
) -> Vec<IndicatorTrend> {
    dimension
        .indicators()
        .iter()
        .map(|&indicator| trend_of(indicator, current.get(indicator), previous.get(indicator)))
        .collect()
}

pub fn compare_years(current: &YearIndicators, previous: &YearIndicators) -> YearComparison {
    YearComparison {
        current_year: current.year,
        previous_year: previous.year,
        trends: Dimension::ALL
            .into_iter()
            .flat_map(|dimension| compare_dimension(current, previous, dimension))
            .collect(),
    }
}

/// Compare the first two years in caller order, if there are two.
pub fn latest_comparison(all: &AllIndicators) -> Option<YearComparison> {
    Some(compare_years(all.latest()?, all.previous()?))
}
