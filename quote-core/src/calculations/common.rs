//! Common utility functions for premium calculations.
//!
//! This module provides shared arithmetic used by the calculator and by
//! the presentation layer, including rounding and rate conversion.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a rate quoted in percentage points into a fraction.
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::percent_to_fraction;
///
/// assert_eq!(percent_to_fraction(dec!(0.65)), dec!(0.0065));
/// ```
pub fn percent_to_fraction(percentage_points: Decimal) -> Decimal {
    percentage_points / Decimal::ONE_HUNDRED
}

/// Whether `value` is a valid fractional rate, i.e. within `[0, 1]`.
pub fn is_unit_rate(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}
