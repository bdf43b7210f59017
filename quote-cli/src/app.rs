//! Glue between command-line input and quotation sessions.

use std::path::{Path, PathBuf};

use quote_core::{Field, PremiumCalculator, RawFields};
use quote_export::{IssueStamp, Preview};

use crate::config::AppConfig;
use crate::csv_loader::{self, CsvLoadError};
use crate::notice::{Notice, NoticeBoard, NoticeKind};
use crate::state::QuotationSession;

/// Which exports to write for each quotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportKind {
    #[default]
    None,
    Spreadsheet,
    Document,
    Both,
}

impl ExportKind {
    pub fn spreadsheet(&self) -> bool {
        matches!(self, Self::Spreadsheet | Self::Both)
    }

    pub fn document(&self) -> bool {
        matches!(self, Self::Document | Self::Both)
    }
}

/// Parses a `NAME=VALUE` field assignment from the command line.
pub fn parse_field_assignment(arg: &str) -> Result<(Field, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    let field =
        Field::parse(name.trim()).ok_or_else(|| format!("unknown field '{}'", name.trim()))?;
    Ok((field, value.to_string()))
}

/// Collects the raw forms to quote.
///
/// With a batch file every row is a form. Otherwise a single form is built
/// from the example quotation (when `example` is set) with `overrides`
/// applied on top.
pub fn collect_forms(
    batch: Option<&Path>,
    example: bool,
    overrides: &[(Field, String)],
) -> Result<Vec<RawFields>, CsvLoadError> {
    if let Some(path) = batch {
        return csv_loader::load_from_file(path);
    }

    let mut fields = if example {
        RawFields::example()
    } else {
        RawFields::new()
    };
    for (field, value) in overrides {
        fields.set(*field, value.clone());
    }
    Ok(vec![fields])
}

/// Result of walking one form through a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotationOutcome {
    pub preview: Preview,
    pub saved: Vec<PathBuf>,
    pub notices: Vec<Notice>,
}

impl QuotationOutcome {
    pub fn failed(&self) -> bool {
        self.notices
            .iter()
            .any(|notice| notice.kind == NoticeKind::Failure)
    }
}

/// Walks `fields` through Details, Covers and Review, then writes the
/// requested exports.
///
/// Must be called from within a tokio runtime.
pub fn run_quotation(
    config: &AppConfig,
    calculator: &PremiumCalculator,
    fields: &RawFields,
    export: ExportKind,
    stamp: IssueStamp,
) -> QuotationOutcome {
    let mut session = QuotationSession::new(
        calculator.clone(),
        config.output_dir.clone(),
        NoticeBoard::new(config.notice_ttl()),
    );
    session.fill(fields);
    let review = session.enter_review();
    tracing::debug!(insured = %review.input.display_name(), "quotation reviewed");
    let preview = Preview::new(&review.input, &review.breakdown);

    let mut saved = Vec::new();
    let mut notices = Vec::new();
    if export.spreadsheet() {
        saved.extend(session.export_spreadsheet(stamp.clone()));
        notices.extend(session.notices().current());
    }
    if export.document() {
        saved.extend(session.export_document(stamp));
        notices.extend(session.notices().current());
    }

    QuotationOutcome {
        preview,
        saved,
        notices,
    }
}

/// Runs every form of a batch in order.
///
/// When there is more than one form, each row's stamp carries its 1-based
/// position so that the rows' exports land in distinct files.
pub fn run_batch(
    config: &AppConfig,
    calculator: &PremiumCalculator,
    forms: &[RawFields],
    export: ExportKind,
    mut stamp: impl FnMut() -> IssueStamp,
) -> Vec<QuotationOutcome> {
    let numbered = forms.len() > 1;
    forms
        .iter()
        .enumerate()
        .map(|(idx, fields)| {
            let stamp = if numbered {
                stamp().with_sequence(idx + 1)
            } else {
                stamp()
            };
            run_quotation(config, calculator, fields, export, stamp)
        })
        .collect()
}
