use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::{format_amount, format_rupees};

/// One named charge of the premium, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineItem {
    NetPremium,
    Srcc,
    TerrorismCover,
    RoadSafetyFund,
    PolicyFee,
    Nbt,
    StampFee,
    Vat,
}

impl LineItem {
    pub const ALL: [LineItem; 8] = [
        LineItem::NetPremium,
        LineItem::Srcc,
        LineItem::TerrorismCover,
        LineItem::RoadSafetyFund,
        LineItem::PolicyFee,
        LineItem::Nbt,
        LineItem::StampFee,
        LineItem::Vat,
    ];

    /// Label shown on previews and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NetPremium => "Net Premium",
            Self::Srcc => "SRCC",
            Self::TerrorismCover => "Terrorism Cover",
            Self::RoadSafetyFund => "Road Safety Fund",
            Self::PolicyFee => "Policy Fee",
            Self::Nbt => "NBT",
            Self::StampFee => "Stamp Fee",
            Self::Vat => "VAT",
        }
    }

    /// Stable machine key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::NetPremium => "net_premium",
            Self::Srcc => "srcc",
            Self::TerrorismCover => "terrorism_cover",
            Self::RoadSafetyFund => "road_safety",
            Self::PolicyFee => "policy_fee",
            Self::Nbt => "nbt",
            Self::StampFee => "stamp_fee",
            Self::Vat => "vat",
        }
    }
}

/// Result of a premium calculation.
///
/// Amounts are kept at full precision; only [`PremiumBreakdown::formatted`]
/// rounds, and it rounds each amount once. `total` is the exact sum of the
/// eight line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub net_premium: Decimal,
    pub srcc: Decimal,
    pub terrorism_cover: Decimal,
    pub road_safety_fund: Decimal,
    pub policy_fee: Decimal,
    pub nbt: Decimal,
    pub stamp_fee: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
}

impl PremiumBreakdown {
    pub fn amount(
        &self,
        item: LineItem,
    ) -> Decimal {
        match item {
            LineItem::NetPremium => self.net_premium,
            LineItem::Srcc => self.srcc,
            LineItem::TerrorismCover => self.terrorism_cover,
            LineItem::RoadSafetyFund => self.road_safety_fund,
            LineItem::PolicyFee => self.policy_fee,
            LineItem::Nbt => self.nbt,
            LineItem::StampFee => self.stamp_fee,
            LineItem::Vat => self.vat,
        }
    }

    /// The eight charges in presentation order, excluding the total.
    pub fn line_items(&self) -> [(LineItem, Decimal); 8] {
        LineItem::ALL.map(|item| (item, self.amount(item)))
    }

    pub fn formatted(&self) -> FormattedBreakdown {
        FormattedBreakdown {
            items: self.line_items().map(|(item, amount)| (item, format_amount(amount))),
            total: format_amount(self.total),
        }
    }
}

impl fmt::Display for PremiumBreakdown {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (item, amount) in self.line_items() {
            writeln!(f, "{:<18}{:>20}", item.label(), format_rupees(amount))?;
        }
        write!(f, "{:<18}{:>20}", "Total Premium", format_rupees(self.total))
    }
}

/// Display strings for a [`PremiumBreakdown`], e.g. `"6,500.00"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedBreakdown {
    pub items: [(LineItem, String); 8],
    pub total: String,
}

impl FormattedBreakdown {
    pub fn get(
        &self,
        item: LineItem,
    ) -> &str {
        self.items
            .iter()
            .find(|(candidate, _)| *candidate == item)
            .map(|(_, value)| value.as_str())
            .unwrap_or("0.00")
    }
}
