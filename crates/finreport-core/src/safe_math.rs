//! Ratio division shared by every indicator formula.
//!
//! A ratio is missing when either operand is missing or the denominator is
//! exactly zero. Results that cannot be represented (NaN, infinities, values
//! beyond decimal range) are also reported as missing instead of panicking.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Figure;

/// Scale for ratios expressed in percent (9.0 means 9%).
pub const PERCENT: f64 = 100.0;

/// Scale for plain ratios and turnover multiples.
pub const PLAIN: f64 = 1.0;

/// Decimal places kept on every computed ratio.
pub const RATIO_DP: u32 = 2;

/// `(numerator / denominator) * scale`, rounded to two decimals.
pub fn safe_ratio(numerator: Figure, denominator: Figure, scale: f64) -> Figure {
    let (numerator, denominator) = (numerator?, denominator?);
    if denominator == 0.0 {
        return None;
    }
    round_dp2(numerator / denominator * scale)
}

/// Round half-to-even on the exact binary value, as the source figures were
/// rounded.
pub fn round_dp2(value: f64) -> Figure {
    if !value.is_finite() {
        return None;
    }
    let rounded = Decimal::from_f64_retain(value)?
        .round_dp_with_strategy(RATIO_DP, RoundingStrategy::MidpointNearestEven);
    // mantissa / 10^scale is a single correctly-rounded division, so 33.33
    // comes back as the same f64 as the literal 33.33.
    Some(rounded.mantissa() as f64 / 10f64.powi(rounded.scale() as i32))
}
