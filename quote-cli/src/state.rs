//! Quotation session state.
//!
//! A session walks the form through three steps, Details, Covers and Review,
//! one at a time. Field values survive moving back and forth. Entering
//! Review always recomputes the breakdown from the current fields; exports
//! recompute as well and never touch the session itself.

use std::fmt;
use std::path::PathBuf;

use quote_core::{Field, PremiumBreakdown, PremiumCalculator, QuotationInput, RawFields};
use quote_export::{
    ExportError, IssueStamp, Preview, QuoteDocument, QuoteSheet, save_document, save_spreadsheet,
};

use crate::notice::NoticeBoard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Details,
    Covers,
    Review,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Details, Step::Covers, Step::Review];

    /// 1-based position, as shown on the progress bar.
    pub fn number(&self) -> usize {
        match self {
            Self::Details => 1,
            Self::Covers => 2,
            Self::Review => 3,
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Self::Details => Some(Self::Covers),
            Self::Covers => Some(Self::Review),
            Self::Review => None,
        }
    }

    pub fn prev(&self) -> Option<Step> {
        match self {
            Self::Details => None,
            Self::Covers => Some(Self::Details),
            Self::Review => Some(Self::Covers),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::Details => "Details",
            Self::Covers => "Covers",
            Self::Review => "Review",
        };
        f.write_str(name)
    }
}

/// How a step shows on the progress bar relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

/// What the Review step shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub input: QuotationInput,
    pub breakdown: PremiumBreakdown,
}

/// One quotation being filled in.
#[derive(Debug)]
pub struct QuotationSession {
    step: Step,
    fields: RawFields,
    review: Option<Review>,
    calculator: PremiumCalculator,
    output_dir: PathBuf,
    notices: NoticeBoard,
}

impl QuotationSession {
    pub fn new(
        calculator: PremiumCalculator,
        output_dir: impl Into<PathBuf>,
        notices: NoticeBoard,
    ) -> Self {
        Self {
            step: Step::Details,
            fields: RawFields::new(),
            review: None,
            calculator,
            output_dir: output_dir.into(),
            notices,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn fields(&self) -> &RawFields {
        &self.fields
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// The computed review, present only while on the Review step.
    pub fn review(&self) -> Option<&Review> {
        self.review.as_ref()
    }

    pub fn preview(&self) -> Option<Preview> {
        self.review
            .as_ref()
            .map(|review| Preview::new(&review.input, &review.breakdown))
    }

    pub fn set_field(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) {
        self.fields.set(field, value);
    }

    /// Copies every value in `fields` into the form.
    pub fn fill(
        &mut self,
        fields: &RawFields,
    ) {
        self.fields.merge(fields);
    }

    /// Pre-fills the form with the example quotation.
    pub fn load_example(&mut self) {
        self.fill(&RawFields::example());
    }

    /// Status of every step, in order.
    pub fn progress(&self) -> [(Step, StepStatus); 3] {
        Step::ALL.map(|step| {
            let status = match step.cmp(&self.step) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => StepStatus::Active,
                std::cmp::Ordering::Greater => StepStatus::Pending,
            };
            (step, status)
        })
    }

    pub fn can_go_back(&self) -> bool {
        self.step.prev().is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        self.step.next().is_some()
    }

    /// Moves one step forward; a no-op on Review.
    pub fn next(&mut self) -> Step {
        if let Some(step) = self.step.next() {
            self.enter(step);
        }
        self.step
    }

    /// Moves one step back, keeping every entered field; a no-op on Details.
    pub fn prev(&mut self) -> Step {
        if let Some(step) = self.step.prev() {
            self.enter(step);
        }
        self.step
    }

    /// Steps forward to Review and returns the freshly computed result.
    pub fn enter_review(&mut self) -> &Review {
        while let Some(step) = self.step.next() {
            self.enter(step);
        }
        let review = self.compute();
        self.review.insert(review)
    }

    fn enter(
        &mut self,
        step: Step,
    ) {
        tracing::debug!(
            from = %self.step,
            to = %step,
            "changing step ({}/{})",
            step.number(),
            Step::ALL.len()
        );
        self.step = step;
        self.review = (step == Step::Review).then(|| self.compute());
    }

    fn compute(&self) -> Review {
        let input = QuotationInput::normalize(&self.fields);
        let breakdown = self.calculator.calculate(&input);
        Review { input, breakdown }
    }

    /// Saves the spreadsheet export and reports the outcome as a notice.
    ///
    /// Returns the written path, or `None` when saving failed.
    pub fn export_spreadsheet(
        &self,
        stamp: IssueStamp,
    ) -> Option<PathBuf> {
        let Review { input, breakdown } = self.compute();
        let sheet = QuoteSheet::new(&input, &breakdown, stamp);
        self.report(
            save_spreadsheet(&self.output_dir, &sheet),
            "Spreadsheet saved",
            "Error generating spreadsheet",
        )
    }

    /// Saves the document export and reports the outcome as a notice.
    pub fn export_document(
        &self,
        stamp: IssueStamp,
    ) -> Option<PathBuf> {
        let Review { input, breakdown } = self.compute();
        let document = QuoteDocument::new(&input, &breakdown, stamp);
        self.report(
            save_document(&self.output_dir, &document),
            "Document saved",
            "Error generating document",
        )
    }

    fn report(
        &self,
        result: Result<PathBuf, ExportError>,
        saved: &str,
        failed: &str,
    ) -> Option<PathBuf> {
        match result {
            Ok(path) => {
                self.notices.success(format!("{saved}: {}", path.display()));
                Some(path)
            }
            Err(error) => {
                tracing::error!(%error, "export failed");
                self.notices.failure(failed);
                None
            }
        }
    }
}
