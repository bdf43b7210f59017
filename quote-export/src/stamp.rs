use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use quote_core::QuoteId;

/// When and under which reference a quotation was exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueStamp {
    pub quote_id: QuoteId,
    pub issued_at: NaiveDateTime,
    /// 1-based position within a batch; `None` for a single quotation.
    pub sequence: Option<usize>,
}

impl IssueStamp {
    /// Stamps a quotation issued at `at`, in `at`'s own time zone.
    pub fn at<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self {
            quote_id: QuoteId::issued_at(at),
            issued_at: at.naive_local(),
            sequence: None,
        }
    }

    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    /// Marks the stamp as the `sequence`-th quotation of a batch.
    pub fn with_sequence(
        self,
        sequence: usize,
    ) -> Self {
        Self {
            sequence: Some(sequence),
            ..self
        }
    }

    /// Short date as a `en-US` locale shows it, e.g. `6/9/2024`.
    pub fn date_display(&self) -> String {
        self.issued_at.format("%-m/%-d/%Y").to_string()
    }

    /// Time as a `en-US` locale shows it, e.g. `3:04:05 PM`.
    pub fn time_display(&self) -> String {
        self.issued_at.format("%-I:%M:%S %p").to_string()
    }

    /// Compact date used in file names, e.g. `20240609`.
    pub fn file_date(&self) -> String {
        self.issued_at.format("%Y%m%d").to_string()
    }

    /// File name suffix that keeps the exports of one batch apart, e.g.
    /// `_002`. Empty outside a batch.
    pub fn file_suffix(&self) -> String {
        self.sequence.map(|n| format!("_{n:03}")).unwrap_or_default()
    }
}
