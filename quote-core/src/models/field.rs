use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Every input the quotation form collects, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    // Details step
    Salutation,
    InsuredName,
    PolicyType,
    VehicleNo,
    SeatingCapacity,
    VehicleValue,
    NetRate,

    // Covers step
    FloodCover,
    SrccCover,
    TcCover,
    ExclusionCover,
    AirbagCover,
    WindscreenCover,
    TowingCharges,
    ThirdPartyDamage,
}

impl Field {
    pub const ALL: [Field; 15] = [
        Field::Salutation,
        Field::InsuredName,
        Field::PolicyType,
        Field::VehicleNo,
        Field::SeatingCapacity,
        Field::VehicleValue,
        Field::NetRate,
        Field::FloodCover,
        Field::SrccCover,
        Field::TcCover,
        Field::ExclusionCover,
        Field::AirbagCover,
        Field::WindscreenCover,
        Field::TowingCharges,
        Field::ThirdPartyDamage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salutation => "salutation",
            Self::InsuredName => "insured_name",
            Self::PolicyType => "policy_type",
            Self::VehicleNo => "vehicle_no",
            Self::SeatingCapacity => "seating_capacity",
            Self::VehicleValue => "vehicle_value",
            Self::NetRate => "net_rate",
            Self::FloodCover => "flood_cover",
            Self::SrccCover => "srcc_cover",
            Self::TcCover => "tc_cover",
            Self::ExclusionCover => "exclusion_cover",
            Self::AirbagCover => "airbag_cover",
            Self::WindscreenCover => "windscreen_cover",
            Self::TowingCharges => "towing_charges",
            Self::ThirdPartyDamage => "third_party_damage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    /// Whether the field is a tick box rather than a text input.
    pub fn is_checkbox(&self) -> bool {
        matches!(
            self,
            Self::FloodCover | Self::SrccCover | Self::TcCover | Self::ExclusionCover
        )
    }
}

/// Raw form values keyed by field, exactly as typed.
///
/// A missing entry reads as the empty string, the same as an untouched
/// input box or an unticked checkbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFields {
    values: BTreeMap<Field, String>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw text for `field`, or `""` when it was never set.
    pub fn get(
        &self,
        field: Field,
    ) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> &mut Self {
        self.values.insert(field, value.into());
        self
    }

    /// Sets a checkbox the way a browser submits it: `on` when ticked,
    /// absent otherwise.
    pub fn set_checked(
        &mut self,
        field: Field,
        checked: bool,
    ) -> &mut Self {
        if checked {
            self.values.insert(field, "on".to_string());
        } else {
            self.values.remove(&field);
        }
        self
    }

    /// Copies every value present in `other` over this one.
    pub fn merge(
        &mut self,
        other: &RawFields,
    ) {
        for (field, value) in &other.values {
            self.values.insert(*field, value.clone());
        }
    }

    /// The example quotation the form is pre-filled with.
    pub fn example() -> Self {
        let mut fields = Self::new();
        fields
            .set(Field::Salutation, "M/S")
            .set(Field::InsuredName, "John Doe")
            .set(Field::PolicyType, "Private Car")
            .set(Field::VehicleNo, "CAB-1234")
            .set(Field::SeatingCapacity, "4")
            .set(Field::VehicleValue, "1000000")
            .set(Field::NetRate, "0.65")
            .set_checked(Field::FloodCover, true)
            .set_checked(Field::SrccCover, true);
        fields
    }
}

impl<'a> FromIterator<(Field, &'a str)> for RawFields {
    fn from_iter<I: IntoIterator<Item = (Field, &'a str)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (field, value) in iter {
            fields.set(field, value);
        }
        fields
    }
}
