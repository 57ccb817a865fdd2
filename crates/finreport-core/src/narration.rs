//! Structured input for a narrative writer.
//!
//! One brief per dimension for the most recent year: values with their
//! display strings, and the trend against the previous year when one exists.

use serde::{Deserialize, Serialize};

use crate::indicators::{AllIndicators, Dimension, Indicator, Unit};
use crate::presentation::format_indicator;
use crate::statements::CompanyProfile;
use crate::trend::{compare_dimension, IndicatorTrend};
use crate::types::Figure;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BriefIndicator {
    pub indicator: Indicator,
    pub value: Figure,
    pub unit: Unit,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionBrief {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub dimension: Dimension,
    pub year: i32,
    pub indicators: Vec<BriefIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_year: Option<i32>,
    pub trends: Vec<IndicatorTrend>,
    pub missing: Vec<Indicator>,
}

/// Empty when no year was computed.
pub fn build_briefs(all: &AllIndicators, profile: Option<&CompanyProfile>) -> Vec<DimensionBrief> {
    let Some(current) = all.latest() else {
        return Vec::new();
    };
    let previous = all.previous();

    Dimension::ALL
        .into_iter()
        .map(|dimension| {
            let values = current.dimension(dimension);
            DimensionBrief {
                company_name: profile.and_then(|p| p.company_name.clone()),
                industry: profile.and_then(|p| p.industry_category.clone()),
                dimension,
                year: current.year,
                indicators: values
                    .iter()
                    .map(|&(indicator, value)| BriefIndicator {
                        indicator,
                        value,
                        unit: indicator.unit(),
                        display: format_indicator(indicator, value),
                    })
                    .collect(),
                comparison_year: previous.map(|p| p.year),
                trends: previous
                    .map(|p| compare_dimension(current, p, dimension))
                    .unwrap_or_default(),
                missing: values
                    .iter()
                    .filter(|(_, v)| v.is_none())
                    .map(|&(indicator, _)| indicator)
                    .collect(),
            }
        })
        .collect()
}
