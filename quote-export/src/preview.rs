//! Review-step preview: a handful of named slots filled with display text.

use std::fmt;

use quote_core::format::format_rupees;
use quote_core::{LineItem, PremiumBreakdown, QuotationInput};
use serde::Serialize;

/// Placeholder for a text slot the user left empty.
const EMPTY_SLOT: &str = "-";

/// Display strings for the review screen, e.g. `total = "Rs. 9,441.81"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub name: String,
    pub vehicle: String,
    pub vehicle_no: String,
    pub sum_insured: String,
    pub net_premium: String,
    pub srcc: String,
    pub terrorism_cover: String,
    pub total: String,
}

fn or_placeholder(text: &str) -> String {
    if text.is_empty() {
        EMPTY_SLOT.to_string()
    } else {
        text.to_string()
    }
}

impl Preview {
    pub fn new(
        input: &QuotationInput,
        breakdown: &PremiumBreakdown,
    ) -> Self {
        Self {
            name: or_placeholder(&input.display_name()),
            vehicle: or_placeholder(&input.policy_type),
            vehicle_no: or_placeholder(&input.vehicle_no),
            sum_insured: format_rupees(input.vehicle_value),
            net_premium: format_rupees(breakdown.amount(LineItem::NetPremium)),
            srcc: format_rupees(breakdown.amount(LineItem::Srcc)),
            terrorism_cover: format_rupees(breakdown.amount(LineItem::TerrorismCover)),
            total: format_rupees(breakdown.total),
        }
    }

    /// Slot names paired with their text, in screen order.
    pub fn slots(&self) -> [(&'static str, &str); 8] {
        [
            ("name", self.name.as_str()),
            ("vehicle", self.vehicle.as_str()),
            ("vehicle_no", self.vehicle_no.as_str()),
            ("sum_insured", self.sum_insured.as_str()),
            (LineItem::NetPremium.key(), self.net_premium.as_str()),
            (LineItem::Srcc.key(), self.srcc.as_str()),
            (LineItem::TerrorismCover.key(), self.terrorism_cover.as_str()),
            ("total", self.total.as_str()),
        ]
    }
}

impl fmt::Display for Preview {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Insured:          {}", self.name)?;
        writeln!(f, "Vehicle:          {}", self.vehicle)?;
        writeln!(f, "Vehicle no:       {}", self.vehicle_no)?;
        writeln!(f, "Sum insured:      {}", self.sum_insured)?;
        writeln!(f, "Net premium:      {}", self.net_premium)?;
        writeln!(f, "SRCC:             {}", self.srcc)?;
        writeln!(f, "Terrorism cover:  {}", self.terrorism_cover)?;
        write!(f, "Total premium:    {}", self.total)
    }
}
