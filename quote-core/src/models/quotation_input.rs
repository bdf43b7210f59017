use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coerce::{decimal_or, is_checked};
use crate::format::format_rupees;
use crate::models::{Field, RawFields};

/// Net rate (percentage points) applied when the form leaves it blank.
pub fn default_net_rate() -> Decimal {
    Decimal::new(65, 2)
}

/// A Yes/No cover selection, shown verbatim on previews and exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverFlag {
    Yes,
    #[default]
    No,
}

impl CoverFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl From<bool> for CoverFlag {
    fn from(checked: bool) -> Self {
        if checked { Self::Yes } else { Self::No }
    }
}

impl fmt::Display for CoverFlag {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed quotation inputs, built once from the raw form via
/// [`QuotationInput::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationInput {
    // Insured and vehicle details
    pub salutation: String,
    pub insured_name: String,
    pub policy_type: String,
    pub vehicle_no: String,
    /// Display only; never enters the calculation.
    pub seating_capacity: String,
    /// Sum insured, the base of the premium.
    pub vehicle_value: Decimal,
    /// Net rate in percentage points (0.65 means 0.65 %).
    pub net_rate: Decimal,

    // Additional covers (presentational)
    pub flood_cover: CoverFlag,
    pub srcc_cover: CoverFlag,
    pub tc_cover: CoverFlag,
    pub exclusion_cover: CoverFlag,

    // Cover sub-limits (presentational, not summed into the premium)
    pub airbag_cover: Decimal,
    pub windscreen_cover: Decimal,
    pub towing_charges: Decimal,
    pub third_party_damage: Decimal,
}

impl Default for QuotationInput {
    fn default() -> Self {
        Self::normalize(&RawFields::default())
    }
}

impl QuotationInput {
    /// Coerces raw form text into typed fields.
    ///
    /// Never fails: unreadable or empty numbers fall back to 0, except the
    /// net rate which falls back to [`default_net_rate`]. Text fields are
    /// trimmed.
    pub fn normalize(raw: &RawFields) -> Self {
        let text = |field: Field| raw.get(field).trim().to_string();
        let amount = |field: Field| decimal_or(field.as_str(), raw.get(field), Decimal::ZERO);
        let flag = |field: Field| CoverFlag::from(is_checked(raw.get(field)));

        Self {
            salutation: text(Field::Salutation),
            insured_name: text(Field::InsuredName),
            policy_type: text(Field::PolicyType),
            vehicle_no: text(Field::VehicleNo),
            seating_capacity: text(Field::SeatingCapacity),
            vehicle_value: amount(Field::VehicleValue),
            net_rate: decimal_or(
                Field::NetRate.as_str(),
                raw.get(Field::NetRate),
                default_net_rate(),
            ),
            flood_cover: flag(Field::FloodCover),
            srcc_cover: flag(Field::SrccCover),
            tc_cover: flag(Field::TcCover),
            exclusion_cover: flag(Field::ExclusionCover),
            airbag_cover: amount(Field::AirbagCover),
            windscreen_cover: amount(Field::WindscreenCover),
            towing_charges: amount(Field::TowingCharges),
            third_party_damage: amount(Field::ThirdPartyDamage),
        }
    }

    /// The example quotation the form is pre-filled with.
    pub fn example() -> Self {
        Self::normalize(&RawFields::example())
    }

    /// Salutation and name joined, e.g. `"M/S John Doe"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.salutation, self.insured_name)
            .trim()
            .to_string()
    }

    /// Net rate as entered, e.g. `"0.65%"`.
    pub fn net_rate_display(&self) -> String {
        format!("{}%", self.net_rate.normalize())
    }
}

impl fmt::Display for QuotationInput {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Insured:            {}", self.display_name())?;
        writeln!(f, "Vehicle type:       {}", self.policy_type)?;
        writeln!(f, "Vehicle no:         {}", self.vehicle_no)?;
        writeln!(f, "Seating capacity:   {}", self.seating_capacity)?;
        writeln!(f, "Vehicle value:      {}", format_rupees(self.vehicle_value))?;
        writeln!(f, "Net rate:           {}", self.net_rate_display())?;
        writeln!(f, "Flood cover:        {}", self.flood_cover)?;
        writeln!(f, "SRCC cover:         {}", self.srcc_cover)?;
        writeln!(f, "Terrorism cover:    {}", self.tc_cover)?;
        writeln!(f, "Exclusion cover:    {}", self.exclusion_cover)?;
        writeln!(f, "Air bag cover:      {}", format_rupees(self.airbag_cover))?;
        writeln!(f, "Windscreen cover:   {}", format_rupees(self.windscreen_cover))?;
        writeln!(f, "Towing charges:     {}", format_rupees(self.towing_charges))?;
        write!(f, "3rd party damage:   {}", format_rupees(self.third_party_damage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn normalize_empty_form_uses_defaults() {
        let input = QuotationInput::normalize(&RawFields::new());

        assert_eq!(input.vehicle_value, dec!(0));
        assert_eq!(input.net_rate, dec!(0.65));
        assert_eq!(input.airbag_cover, dec!(0));
        assert_eq!(input.windscreen_cover, dec!(0));
        assert_eq!(input.towing_charges, dec!(0));
        assert_eq!(input.third_party_damage, dec!(0));
        assert_eq!(input.flood_cover, CoverFlag::No);
        assert_eq!(input.insured_name, "");
    }

    #[test]
    fn normalize_blank_value_and_rate() {
        let raw: RawFields = [(Field::VehicleValue, ""), (Field::NetRate, "")]
            .into_iter()
            .collect();

        let input = QuotationInput::normalize(&raw);

        assert_eq!(input.vehicle_value, dec!(0));
        assert_eq!(input.net_rate, dec!(0.65));
    }

    #[test]
    fn normalize_garbage_numbers_fall_back() {
        let raw: RawFields = [
            (Field::VehicleValue, "lots"),
            (Field::NetRate, "%"),
            (Field::AirbagCover, "n/a"),
            (Field::TowingCharges, "¯\\_(ツ)_/¯"),
        ]
        .into_iter()
        .collect();

        let input = QuotationInput::normalize(&raw);

        assert_eq!(input.vehicle_value, dec!(0));
        assert_eq!(input.net_rate, dec!(0.65));
        assert_eq!(input.airbag_cover, dec!(0));
        assert_eq!(input.towing_charges, dec!(0));
    }

    #[test]
    fn normalize_reads_amounts_and_flags() {
        let raw: RawFields = [
            (Field::VehicleValue, "2,500,000"),
            (Field::NetRate, "1.1"),
            (Field::WindscreenCover, "75000"),
            (Field::TcCover, "on"),
            (Field::ExclusionCover, "off"),
        ]
        .into_iter()
        .collect();

        let input = QuotationInput::normalize(&raw);

        assert_eq!(input.vehicle_value, dec!(2500000));
        assert_eq!(input.net_rate, dec!(1.1));
        assert_eq!(input.windscreen_cover, dec!(75000));
        assert_eq!(input.tc_cover, CoverFlag::Yes);
        assert_eq!(input.exclusion_cover, CoverFlag::No);
    }

    #[test]
    fn normalize_trims_text_fields() {
        let raw: RawFields = [(Field::InsuredName, "  Jane Perera "), (Field::VehicleNo, " KX-9001")]
            .into_iter()
            .collect();

        let input = QuotationInput::normalize(&raw);

        assert_eq!(input.insured_name, "Jane Perera");
        assert_eq!(input.vehicle_no, "KX-9001");
    }

    #[test]
    fn example_matches_prefilled_form() {
        let input = QuotationInput::example();

        assert_eq!(input.display_name(), "M/S John Doe");
        assert_eq!(input.policy_type, "Private Car");
        assert_eq!(input.vehicle_value, dec!(1000000));
        assert_eq!(input.net_rate, dec!(0.65));
        assert_eq!(input.flood_cover, CoverFlag::Yes);
        assert_eq!(input.srcc_cover, CoverFlag::Yes);
        assert_eq!(input.tc_cover, CoverFlag::No);
    }

    #[test]
    fn display_name_without_salutation_has_no_leading_space() {
        let input = QuotationInput {
            insured_name: "John Doe".to_string(),
            ..QuotationInput::default()
        };

        assert_eq!(input.display_name(), "John Doe");
    }

    #[test]
    fn net_rate_display_drops_trailing_zeros() {
        let input = QuotationInput {
            net_rate: dec!(0.650),
            ..QuotationInput::default()
        };

        assert_eq!(input.net_rate_display(), "0.65%");
    }

    #[test]
    fn cover_flag_renders_yes_no() {
        assert_eq!(CoverFlag::from(true).to_string(), "Yes");
        assert_eq!(CoverFlag::from(false).to_string(), "No");
    }
}
