mod field;
mod premium_breakdown;
mod quotation_input;
mod quote_id;

pub use field::{Field, RawFields};
pub use premium_breakdown::{FormattedBreakdown, LineItem, PremiumBreakdown};
pub use quotation_input::{CoverFlag, QuotationInput, default_net_rate};
pub use quote_id::QuoteId;
