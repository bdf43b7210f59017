//! Motor premium calculation using a fixed fee schedule.
//!
//! # Schedule
//!
//! | Step | Line item        | Amount |
//! |------|------------------|--------|
//! | 1    | Net Premium      | vehicle value × net rate / 100 |
//! | 2    | SRCC             | Net Premium × 2% |
//! | 3    | Terrorism Cover  | Net Premium × 1.5% |
//! | 4    | Road Safety Fund | Net Premium × 1% |
//! | 5    | Policy Fee       | flat 1,000 |
//! | 6    | NBT              | Net Premium × 2.564% |
//! | 7    | Stamp Fee        | flat 50 |
//! | 8    | VAT              | (lines 1 through 6) × 18% |
//! | 9    | Total            | lines 1 through 8 |
//!
//! VAT is charged on the subtotal before the stamp fee. Cover sub-limits
//! (air bag, windscreen, towing, third party) are shown on the quote but
//! never enter the premium.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::{PremiumCalculator, QuotationInput};
//!
//! let input = QuotationInput {
//!     vehicle_value: dec!(1000000),
//!     net_rate: dec!(0.65),
//!     ..QuotationInput::default()
//! };
//!
//! let breakdown = PremiumCalculator::default().calculate(&input);
//!
//! assert_eq!(breakdown.net_premium, dec!(6500));
//! assert_eq!(breakdown.formatted().total, "9,441.81");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{is_unit_rate, percent_to_fraction};
use crate::coerce::max_input_magnitude;
use crate::models::{PremiumBreakdown, QuotationInput};

/// Errors raised when a fee schedule is out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeeScheduleError {
    /// A percentage surcharge must be a fraction between 0 and 1.
    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidRate { name: &'static str, value: Decimal },

    /// A flat fee must be non-negative and no larger than 10^15.
    #[error("{name} must be between 0 and 10^15, got {value}")]
    InvalidFlatFee { name: &'static str, value: Decimal },
}

/// The rates and flat fees applied on top of the net premium.
///
/// Rates are fractions (`0.02` means 2%). [`FeeSchedule::default`] is the
/// standard motor schedule; deserialization fills any missing key from it
/// and rejects keys it does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeeSchedule {
    /// Strike, riot and civil commotion surcharge.
    pub srcc_rate: Decimal,
    pub terrorism_rate: Decimal,
    pub road_safety_rate: Decimal,
    /// Nation Building Tax on the net premium.
    pub nbt_rate: Decimal,
    /// VAT on the subtotal before the stamp fee.
    pub vat_rate: Decimal,
    pub policy_fee: Decimal,
    pub stamp_fee: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            srcc_rate: Decimal::new(2, 2),
            terrorism_rate: Decimal::new(15, 3),
            road_safety_rate: Decimal::new(1, 2),
            nbt_rate: Decimal::new(2564, 5),
            vat_rate: Decimal::new(18, 2),
            policy_fee: Decimal::new(1000, 0),
            stamp_fee: Decimal::new(50, 0),
        }
    }
}

impl FeeSchedule {
    /// Validates the schedule values.
    ///
    /// # Errors
    ///
    /// Returns [`FeeScheduleError`] if any rate is outside `[0, 1]` or any
    /// flat fee is negative or above 10^15.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use quote_core::{FeeSchedule, FeeScheduleError};
    ///
    /// let schedule = FeeSchedule { vat_rate: dec!(18), ..FeeSchedule::default() };
    ///
    /// assert_eq!(
    ///     schedule.validate(),
    ///     Err(FeeScheduleError::InvalidRate { name: "vat_rate", value: dec!(18) })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), FeeScheduleError> {
        let rates = [
            ("srcc_rate", self.srcc_rate),
            ("terrorism_rate", self.terrorism_rate),
            ("road_safety_rate", self.road_safety_rate),
            ("nbt_rate", self.nbt_rate),
            ("vat_rate", self.vat_rate),
        ];
        if let Some((name, value)) = rates.into_iter().find(|(_, rate)| !is_unit_rate(*rate)) {
            return Err(FeeScheduleError::InvalidRate { name, value });
        }

        let fees = [("policy_fee", self.policy_fee), ("stamp_fee", self.stamp_fee)];
        if let Some((name, value)) = fees
            .into_iter()
            .find(|(_, fee)| *fee < Decimal::ZERO || *fee > max_input_magnitude())
        {
            return Err(FeeScheduleError::InvalidFlatFee { name, value });
        }

        Ok(())
    }
}

/// Applies a [`FeeSchedule`] to quotation inputs.
///
/// Construction validates the schedule; after that, [`calculate`] cannot
/// fail for any input.
///
/// [`calculate`]: PremiumCalculator::calculate
#[derive(Debug, Clone, Default)]
pub struct PremiumCalculator {
    schedule: FeeSchedule,
}

impl PremiumCalculator {
    /// Creates a calculator for `schedule`.
    ///
    /// # Errors
    ///
    /// Returns [`FeeScheduleError`] when the schedule fails
    /// [`FeeSchedule::validate`].
    pub fn new(schedule: FeeSchedule) -> Result<Self, FeeScheduleError> {
        schedule.validate()?;
        Ok(Self { schedule })
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Computes the premium breakdown for `input`.
    ///
    /// Every amount is kept at full precision and the total is the exact sum
    /// of the eight line items; rounding happens only when formatting.
    pub fn calculate(
        &self,
        input: &QuotationInput,
    ) -> PremiumBreakdown {
        let schedule = &self.schedule;

        let net_premium = self.net_premium(input.vehicle_value, input.net_rate);
        let srcc = net_premium * schedule.srcc_rate;
        let terrorism_cover = net_premium * schedule.terrorism_rate;
        let road_safety_fund = net_premium * schedule.road_safety_rate;
        let policy_fee = schedule.policy_fee;
        let nbt = net_premium * schedule.nbt_rate;
        let stamp_fee = schedule.stamp_fee;

        let vat_base = net_premium + srcc + terrorism_cover + road_safety_fund + policy_fee + nbt;
        let vat = vat_base * schedule.vat_rate;

        let total = vat_base + stamp_fee + vat;

        tracing::debug!(
            vehicle_value = %input.vehicle_value,
            net_rate = %input.net_rate,
            %net_premium,
            %total,
            "premium calculated"
        );

        PremiumBreakdown {
            net_premium,
            srcc,
            terrorism_cover,
            road_safety_fund,
            policy_fee,
            nbt,
            stamp_fee,
            vat,
            total,
        }
    }

    /// Net premium: vehicle value × net rate (percentage points).
    ///
    /// Both inputs and the product are clamped to ±10^15. With every rate at
    /// most 1 and every flat fee at most 10^15, the total is then at most
    /// 1.3 × 10^16.
    fn net_premium(
        &self,
        vehicle_value: Decimal,
        net_rate: Decimal,
    ) -> Decimal {
        let limit = max_input_magnitude();
        let vehicle_value = vehicle_value.clamp(-limit, limit);
        let net_rate = net_rate.clamp(-limit, limit);
        (vehicle_value * percent_to_fraction(net_rate)).clamp(-limit, limit)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{Field, LineItem, RawFields};

    fn input(
        vehicle_value: Decimal,
        net_rate: Decimal,
    ) -> QuotationInput {
        QuotationInput {
            vehicle_value,
            net_rate,
            ..QuotationInput::default()
        }
    }

    // =========================================================================
    // FeeSchedule tests
    // =========================================================================

    #[test]
    fn default_schedule_is_valid() {
        assert_eq!(FeeSchedule::default().validate(), Ok(()));
    }

    #[test]
    fn default_schedule_uses_standard_rates() {
        let schedule = FeeSchedule::default();

        assert_eq!(schedule.srcc_rate, dec!(0.02));
        assert_eq!(schedule.terrorism_rate, dec!(0.015));
        assert_eq!(schedule.road_safety_rate, dec!(0.01));
        assert_eq!(schedule.nbt_rate, dec!(0.02564));
        assert_eq!(schedule.vat_rate, dec!(0.18));
        assert_eq!(schedule.policy_fee, dec!(1000));
        assert_eq!(schedule.stamp_fee, dec!(50));
    }

    #[test]
    fn validate_rejects_negative_rate() {
        let schedule = FeeSchedule {
            srcc_rate: dec!(-0.02),
            ..FeeSchedule::default()
        };

        assert_eq!(
            schedule.validate(),
            Err(FeeScheduleError::InvalidRate {
                name: "srcc_rate",
                value: dec!(-0.02)
            })
        );
    }

    #[test]
    fn validate_rejects_negative_fee() {
        let schedule = FeeSchedule {
            stamp_fee: dec!(-50),
            ..FeeSchedule::default()
        };

        assert_eq!(
            schedule.validate(),
            Err(FeeScheduleError::InvalidFlatFee {
                name: "stamp_fee",
                value: dec!(-50)
            })
        );
    }

    #[test]
    fn validate_rejects_huge_fee() {
        let schedule = FeeSchedule {
            policy_fee: dec!(1000000000000000000),
            ..FeeSchedule::default()
        };

        assert!(matches!(
            schedule.validate(),
            Err(FeeScheduleError::InvalidFlatFee { name: "policy_fee", .. })
        ));
    }

    #[test]
    fn misspelled_schedule_key_is_rejected() {
        let parsed = toml::from_str::<FeeSchedule>("nbt = \"0.025\"");

        assert!(parsed.is_err());
    }

    #[test]
    fn new_refuses_invalid_schedule() {
        let schedule = FeeSchedule {
            nbt_rate: dec!(2.5),
            ..FeeSchedule::default()
        };

        assert!(PremiumCalculator::new(schedule).is_err());
    }

    #[test]
    fn missing_schedule_keys_fall_back_to_defaults() {
        let schedule: FeeSchedule = toml::from_str("nbt_rate = \"0.025\"").unwrap();

        assert_eq!(schedule.nbt_rate, dec!(0.025));
        assert_eq!(schedule.vat_rate, dec!(0.18));
        assert_eq!(schedule.policy_fee, dec!(1000));
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_reference_quotation() {
        let breakdown = PremiumCalculator::default().calculate(&input(dec!(1000000), dec!(0.65)));

        assert_eq!(breakdown.net_premium, dec!(6500));
        assert_eq!(breakdown.srcc, dec!(130));
        assert_eq!(breakdown.terrorism_cover, dec!(97.5));
        assert_eq!(breakdown.road_safety_fund, dec!(65));
        assert_eq!(breakdown.policy_fee, dec!(1000));
        assert_eq!(breakdown.nbt, dec!(166.66));
        assert_eq!(breakdown.stamp_fee, dec!(50));
        // (6500 + 130 + 97.5 + 65 + 1000 + 166.66) × 0.18
        assert_eq!(breakdown.vat, dec!(1432.6488));
        assert_eq!(breakdown.total, dec!(9441.8088));
    }

    #[test]
    fn calculate_reference_quotation_formatted() {
        let formatted = PremiumCalculator::default()
            .calculate(&input(dec!(1000000), dec!(0.65)))
            .formatted();

        assert_eq!(formatted.get(LineItem::NetPremium), "6,500.00");
        assert_eq!(formatted.get(LineItem::Srcc), "130.00");
        assert_eq!(formatted.get(LineItem::TerrorismCover), "97.50");
        assert_eq!(formatted.get(LineItem::RoadSafetyFund), "65.00");
        assert_eq!(formatted.get(LineItem::PolicyFee), "1,000.00");
        assert_eq!(formatted.get(LineItem::Nbt), "166.66");
        assert_eq!(formatted.get(LineItem::StampFee), "50.00");
        assert_eq!(formatted.get(LineItem::Vat), "1,432.65");
        assert_eq!(formatted.total, "9,441.81");
    }

    #[test]
    fn calculate_blank_form_charges_flat_fees_only() {
        let raw: RawFields = [(Field::VehicleValue, ""), (Field::NetRate, "")]
            .into_iter()
            .collect();

        let breakdown = PremiumCalculator::default().calculate(&QuotationInput::normalize(&raw));

        assert_eq!(breakdown.net_premium, dec!(0));
        assert_eq!(breakdown.srcc, dec!(0));
        assert_eq!(breakdown.nbt, dec!(0));
        // VAT still applies to the policy fee.
        assert_eq!(breakdown.vat, dec!(180));
        assert_eq!(breakdown.formatted().total, "1,230.00");
    }

    #[test]
    fn calculate_total_is_exact_sum_of_items() {
        let calculator = PremiumCalculator::default();

        for (value, rate) in [
            (dec!(1000000), dec!(0.65)),
            (dec!(3333333.33), dec!(1.17)),
            (dec!(987654.321), dec!(2.5)),
            (dec!(1), dec!(0.01)),
        ] {
            let breakdown = calculator.calculate(&input(value, rate));
            let sum: Decimal = breakdown.line_items().iter().map(|(_, amount)| *amount).sum();

            assert_eq!(breakdown.total, sum, "value {value} at rate {rate}");
        }
    }

    #[test]
    fn calculate_non_negative_inputs_give_non_negative_items() {
        let calculator = PremiumCalculator::default();

        for (value, rate) in [
            (dec!(0), dec!(0)),
            (dec!(0), dec!(0.65)),
            (dec!(500000), dec!(0)),
            (dec!(25000000), dec!(3.75)),
        ] {
            let breakdown = calculator.calculate(&input(value, rate));

            for (item, amount) in breakdown.line_items() {
                assert!(amount >= Decimal::ZERO, "{} negative", item.label());
            }
            assert!(breakdown.total >= breakdown.net_premium);
        }
    }

    #[test]
    fn calculate_ignores_sub_limits_and_cover_flags() {
        let calculator = PremiumCalculator::default();
        let plain = input(dec!(1000000), dec!(0.65));
        let covered = QuotationInput {
            airbag_cover: dec!(100000),
            windscreen_cover: dec!(50000),
            towing_charges: dec!(25000),
            third_party_damage: dec!(1000000),
            flood_cover: crate::models::CoverFlag::Yes,
            tc_cover: crate::models::CoverFlag::Yes,
            ..plain.clone()
        };

        assert_eq!(calculator.calculate(&plain), calculator.calculate(&covered));
    }

    #[test]
    fn calculate_is_idempotent() {
        let calculator = PremiumCalculator::default();
        let input = input(dec!(1234567.89), dec!(0.73));

        let first = calculator.calculate(&input).formatted();
        let second = calculator.calculate(&input).formatted();

        assert_eq!(first, second);
    }

    #[test]
    fn calculate_scales_linearly_for_negative_values() {
        let breakdown = PremiumCalculator::default().calculate(&input(dec!(-1000000), dec!(0.65)));

        assert_eq!(breakdown.net_premium, dec!(-6500));
        assert_eq!(breakdown.srcc, dec!(-130));
        assert_eq!(breakdown.policy_fee, dec!(1000));
    }

    #[test]
    fn calculate_clamps_out_of_range_inputs() {
        let breakdown = PremiumCalculator::default().calculate(&input(Decimal::MAX, Decimal::MAX));

        assert_eq!(breakdown.net_premium, dec!(1000000000000000));

        let breakdown = PremiumCalculator::default().calculate(&input(Decimal::MIN, Decimal::MAX));

        assert_eq!(breakdown.net_premium, dec!(-1000000000000000));
    }

    #[test]
    fn calculate_largest_accepted_schedule_stays_in_range() {
        let limit = max_input_magnitude();
        let calculator = PremiumCalculator::new(FeeSchedule {
            srcc_rate: Decimal::ONE,
            terrorism_rate: Decimal::ONE,
            road_safety_rate: Decimal::ONE,
            nbt_rate: Decimal::ONE,
            vat_rate: Decimal::ONE,
            policy_fee: limit,
            stamp_fee: limit,
        })
        .unwrap();
        let raw: RawFields = [(Field::VehicleValue, "1e15"), (Field::NetRate, "1e15")]
            .into_iter()
            .collect();

        let breakdown = calculator.calculate(&QuotationInput::normalize(&raw));

        assert_eq!(breakdown.net_premium, limit);
        // six items of 10^15 taxed at 100%, plus the stamp fee
        assert_eq!(breakdown.vat, dec!(6000000000000000));
        assert_eq!(breakdown.total, dec!(13000000000000000));
    }

    #[test]
    fn calculate_uses_passed_schedule() {
        let calculator = PremiumCalculator::new(FeeSchedule {
            nbt_rate: dec!(0.025),
            ..FeeSchedule::default()
        })
        .unwrap();

        let breakdown = calculator.calculate(&input(dec!(1000000), dec!(0.65)));

        assert_eq!(breakdown.nbt, dec!(162.5));
    }
}
