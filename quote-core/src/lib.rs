pub mod calculations;
pub mod coerce;
pub mod format;
pub mod models;

pub use calculations::{FeeSchedule, FeeScheduleError, PremiumCalculator};
pub use models::*;
