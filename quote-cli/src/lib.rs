pub mod app;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod notice;
pub mod state;

pub use app::{ExportKind, QuotationOutcome, run_batch, run_quotation};
pub use config::{AppConfig, ConfigError};
pub use state::{QuotationSession, Step};
