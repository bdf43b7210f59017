//! Premium calculation for motor insurance quotations.
//!
//! This module turns a normalized [`QuotationInput`](crate::QuotationInput)
//! into a [`PremiumBreakdown`](crate::PremiumBreakdown) by applying a fee
//! schedule.

pub mod common;
pub mod premium;

pub use premium::{FeeSchedule, FeeScheduleError, PremiumCalculator};
