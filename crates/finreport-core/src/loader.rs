//! Turns one flat spreadsheet row into a statement store.
//!
//! Column headers look like `<label>_<year>`, where the label is either the
//! localized line-item name used by the report template or the canonical
//! field name. Unparseable cells become missing values, never zero.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::statements::{CompanyProfile, Field, RawStatementStore, Statement, YearlyFinancialData};
use crate::types::Figure;
use crate::{FinReportError, FinReportResult};

/// Localized template labels for each statement line item.
pub const STATEMENT_LABELS: &[(&str, Field)] = &[
    ("总资产", Field::TotalAssets),
    ("流动资产", Field::CurrentAssets),
    ("非流动资产", Field::NonCurrentAssets),
    ("总负债", Field::TotalLiabilities),
    ("流动负债", Field::CurrentLiabilities),
    ("非流动负债", Field::NonCurrentLiabilities),
    ("所有者权益", Field::OwnersEquity),
    ("营业收入", Field::OperatingRevenue),
    ("营业成本", Field::OperatingCosts),
    ("营业利润", Field::OperatingProfit),
    ("利润总额", Field::TotalProfit),
    ("净利润", Field::NetProfit),
    ("经营活动现金流量净额", Field::OperatingCashFlow),
    ("投资活动现金流量净额", Field::InvestingCashFlow),
    ("筹资活动现金流量净额", Field::FinancingCashFlow),
    ("现金及现金等价物净增加额", Field::NetCashIncrease),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileField {
    CompanyName,
    SocialCreditCode,
    RegisteredCapital,
    EstablishmentDate,
    IndustryCategory,
    LegalRepresentative,
}

/// (localized header, canonical header, field)
const PROFILE_LABELS: &[(&str, &str, ProfileField)] = &[
    ("企业名称", "company_name", ProfileField::CompanyName),
    ("统一社会信用代码", "social_credit_code", ProfileField::SocialCreditCode),
    ("注册资本（万元）", "registered_capital", ProfileField::RegisteredCapital),
    ("成立日期", "establishment_date", ProfileField::EstablishmentDate),
    ("行业类别", "industry_category", ProfileField::IndustryCategory),
    ("法定代表人", "legal_representative", ProfileField::LegalRepresentative),
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y年%m月%d日", "%Y.%m.%d"];

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadedStatements {
    pub store: RawStatementStore,
    pub profile: CompanyProfile,
    /// Most recent first.
    pub years: Vec<i32>,
    pub warnings: Vec<String>,
}

impl LoadedStatements {
    /// Wrap an already-structured store; years keep the store's order.
    pub fn from_store(store: RawStatementStore) -> Self {
        Self {
            years: store.years(),
            store,
            profile: CompanyProfile::default(),
            warnings: Vec::new(),
        }
    }
}

/// Outcome of reading one cell as an amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Present(f64),
    Empty,
    Malformed,
}

impl Cell {
    pub fn figure(self) -> Figure {
        match self {
            Cell::Present(v) => Some(v),
            Cell::Empty | Cell::Malformed => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Resolve a header label (localized or canonical) to a line item.
pub fn resolve_label(label: &str) -> Option<Field> {
    let label = label.trim();
    STATEMENT_LABELS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, field)| *field)
        .or_else(|| label.parse::<Field>().ok())
}

/// Split `<label>_<year>` on the last underscore.
pub fn split_header(header: &str) -> Option<(&str, i32)> {
    let (label, year) = header.trim().rsplit_once('_')?;
    if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((label, year.parse().ok()?))
}

pub fn parse_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Empty,
        Value::Number(n) => match n.as_f64() {
            Some(v) if v.is_finite() => Cell::Present(v),
            _ => Cell::Malformed,
        },
        Value::String(s) => parse_amount(s),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Cell::Malformed,
    }
}

/// Parse a textual amount: trims, strips thousands separators, and treats
/// blanks and NaN markers as empty.
pub fn parse_amount(raw: &str) -> Cell {
    let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();
    let lowered = cleaned.to_ascii_lowercase();
    if cleaned.is_empty() || matches!(lowered.as_str(), "nan" | "none" | "null") {
        return Cell::Empty;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Present(v),
        _ => Cell::Malformed,
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Every year named by a `<label>_<year>` header, most recent first,
/// truncated to `max_years`. Any label counts, not only statement items.
pub fn detect_years(record: &Map<String, Value>, max_years: usize) -> Vec<i32> {
    let years: BTreeSet<i32> = record
        .keys()
        .filter_map(|header| split_header(header).map(|(_, year)| year))
        .collect();
    years.into_iter().rev().take(max_years).collect()
}

/// Load one flat record (header -> cell) into statements for the most recent
/// `config.max_years` years.
pub fn load_record(
    record: &Map<String, Value>,
    config: &EngineConfig,
) -> FinReportResult<LoadedStatements> {
    config.validate()?;
    if record.is_empty() {
        return Err(FinReportError::InsufficientData(
            "Input record has no columns.".into(),
        ));
    }

    let mut warnings = Vec::new();
    let years = detect_years(record, config.max_years);

    // (year, field) -> value; a present value wins over an empty duplicate.
    let mut cells: BTreeMap<(i32, Field), Figure> = BTreeMap::new();
    for (header, raw) in record {
        let Some((label, year)) = split_header(header) else {
            continue;
        };
        let Some(field) = resolve_label(label) else {
            continue;
        };
        if !years.contains(&year) {
            continue;
        }
        let cell = parse_cell(raw);
        if cell == Cell::Malformed {
            warn!(header = header.as_str(), "unparseable amount treated as missing");
            warnings.push(format!("Column '{header}' is not a number; treated as missing."));
        }
        let slot = cells.entry((year, field)).or_insert(None);
        if slot.is_none() {
            *slot = cell.figure();
        }
    }

    if cells.is_empty() {
        return Err(FinReportError::InsufficientData(
            "No financial statement columns found.".into(),
        ));
    }

    let mut store = RawStatementStore::new();
    for &year in &years {
        let mut data = YearlyFinancialData::new();
        for statement in Statement::ALL {
            for &field in statement.fields() {
                data.set(field, cells.get(&(year, field)).copied().flatten());
            }
        }
        debug!(year, fields = data.present_count(), "loaded statements");
        store.insert(year, data);
    }

    let profile = load_profile(record, &mut warnings);

    Ok(LoadedStatements {
        store,
        profile,
        years,
        warnings,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn load_profile(record: &Map<String, Value>, warnings: &mut Vec<String>) -> CompanyProfile {
    let mut profile = CompanyProfile::default();

    for &(localized, canonical, field) in PROFILE_LABELS {
        let value = record
            .get(localized)
            .or_else(|| record.get(canonical))
            .filter(|v| !v.is_null());
        let Some(value) = value else {
            warnings.push(format!("Basic information field '{canonical}' is missing."));
            continue;
        };

        match field {
            ProfileField::CompanyName => profile.company_name = text(value),
            ProfileField::SocialCreditCode => profile.social_credit_code = text(value),
            ProfileField::IndustryCategory => profile.industry_category = text(value),
            ProfileField::LegalRepresentative => profile.legal_representative = text(value),
            ProfileField::RegisteredCapital => {
                let cell = parse_cell(value);
                if cell == Cell::Malformed {
                    warnings.push(format!("Registered capital '{value}' is not a number."));
                }
                profile.registered_capital = cell.figure();
            }
            ProfileField::EstablishmentDate => {
                profile.establishment_date = text(value).as_deref().and_then(parse_date);
                if profile.establishment_date.is_none() {
                    warnings.push(format!("Establishment date '{value}' is not a date."));
                }
            }
        }
    }

    profile
}

fn text(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}
