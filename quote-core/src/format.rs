//! Money formatting shared by the preview and both exports.
//!
//! Amounts render the way an `en-US` locale prints them with exactly two
//! fraction digits: `6500` becomes `"6,500.00"`.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Currency prefix used on every displayed amount.
pub const CURRENCY_PREFIX: &str = "Rs.";

/// Formats `value` with thousands separators and two fraction digits.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::format::format_amount;
///
/// assert_eq!(format_amount(dec!(6500)), "6,500.00");
/// assert_eq!(format_amount(dec!(97.5)), "97.50");
/// assert_eq!(format_amount(dec!(-1234567.891)), "-1,234,567.89");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(plain.len() + plain.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push('.');
    grouped.push_str(fraction);
    grouped
}

/// Formats `value` as a rupee amount, e.g. `"Rs. 6,500.00"`.
pub fn format_rupees(value: Decimal) -> String {
    format!("{CURRENCY_PREFIX} {}", format_amount(value))
}
