//! Lenient coercion of raw form text into typed values.
//!
//! Nothing in here fails: text that cannot be read as a number yields `None`
//! and the caller substitutes a default.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

/// Largest magnitude accepted from a single form field (10^15).
///
/// Anything above this is treated as unreadable so that the premium
/// arithmetic stays inside the 96-bit decimal range.
pub fn max_input_magnitude() -> Decimal {
    Decimal::new(1_000_000_000_000_000, 0)
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Leading number of a form value: sign, integer digits, fraction digits and
/// an exponent that only counts when at least one digit follows it.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<sign>[+-])?(?P<int>\d*)(?:\.(?P<frac>\d*))?(?:[eE](?P<exp>[+-]?\d+))?")
        .expect("numeric prefix regex compiles")
});

/// Parses the leading number of `s`, the way a browser's `parseFloat` reads
/// form text.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and ignores any
/// trailing garbage (`"12abc"` reads as 12). Returns `None` for empty input,
/// input without a leading number, or values beyond [`max_input_magnitude`].
pub fn parse_lenient(s: &str) -> Option<Decimal> {
    let normalized = normalize_decimal_input(s);
    let caps = NUMERIC_PREFIX.captures(&normalized)?;
    let group = |name| caps.name(name).map_or("", |m| m.as_str());
    let (integer, fraction) = (group("int"), group("frac"));
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut mantissa = String::with_capacity(normalized.len() + 2);
    if group("sign") == "-" {
        mantissa.push('-');
    }
    mantissa.push_str(if integer.is_empty() { "0" } else { integer });
    if !fraction.is_empty() {
        mantissa.push('.');
        mantissa.push_str(fraction);
    }

    let parsed = match caps.name("exp") {
        Some(exp) => Decimal::from_scientific(&format!("{mantissa}e{}", exp.as_str())).ok()?,
        None => mantissa.parse::<Decimal>().ok()?,
    };

    if parsed.abs() > max_input_magnitude() {
        tracing::warn!(input = %s, "value out of range, treating as unreadable");
        return None;
    }

    Some(parsed)
}

/// Reads a decimal form field, substituting `default` when the text is empty
/// or unreadable.
pub fn decimal_or(
    field: &str,
    raw: &str,
    default: Decimal,
) -> Decimal {
    match parse_lenient(raw) {
        Some(value) => value,
        None => {
            if !raw.trim().is_empty() {
                tracing::warn!(field, input = %raw, %default, "unreadable number, using default");
            } else {
                tracing::debug!(field, %default, "empty number, using default");
            }
            default
        }
    }
}

/// Returns `true` when a checkbox-like value reads as ticked.
///
/// Mirrors HTML form submission, where a ticked box sends `on` and an
/// unticked one sends nothing.
pub fn is_checked(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "on" | "yes" | "y" | "true" | "1" | "checked" | "x"
    )
}
