//! Presentation and export of computed quotations.
//!
//! | Module | Output |
//! |--------|--------|
//! | [`preview`] | display strings for the review step |
//! | [`spreadsheet`] | six-column grid, saved as CSV |
//! | [`document`] | printable page, saved as fixed-width text |
//! | [`writer`] | file output for the two exports |

pub mod document;
pub mod preview;
pub mod spreadsheet;
pub mod stamp;
pub mod writer;

pub use document::{DocumentProperties, QuoteDocument};
pub use preview::Preview;
pub use spreadsheet::QuoteSheet;
pub use stamp::IssueStamp;
pub use writer::{ExportError, save_document, save_spreadsheet};
