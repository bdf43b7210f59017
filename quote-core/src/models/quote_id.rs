use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Display-only quotation reference, e.g. `MOB23456789`.
///
/// Derived from the millisecond clock, so two quotes issued in the same
/// millisecond share a number. It is not a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(String);

impl QuoteId {
    pub const PREFIX: &'static str = "MOB";

    /// Builds the reference from the trailing eight digits of a Unix
    /// millisecond timestamp.
    pub fn from_timestamp_millis(millis: i64) -> Self {
        let digits = millis.unsigned_abs().to_string();
        let tail = &digits[digits.len().saturating_sub(8)..];
        Self(format!("{}{}", Self::PREFIX, tail))
    }

    pub fn issued_at<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self::from_timestamp_millis(at.timestamp_millis())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuoteId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}
