//! Printable document export.
//!
//! The document is modelled as ordered labelled lines plus a two-column
//! breakdown table, and rendered to fixed-width text.

use std::fmt;

use quote_core::format::format_rupees;
use quote_core::{PremiumBreakdown, QuotationInput};

use crate::stamp::IssueStamp;

/// Rendered page width in characters.
pub const PAGE_WIDTH: usize = 72;

/// Metadata printed at the foot of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentProperties {
    pub title: &'static str,
    pub subject: &'static str,
    pub author: &'static str,
    pub keywords: &'static str,
    pub creator: &'static str,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            title: "Motor Insurance Quotation",
            subject: "Insurance Quote",
            author: "Mobile Insurance App",
            keywords: "insurance, motor, quotation",
            creator: "Mobile Insurance App",
        }
    }
}

impl fmt::Display for DocumentProperties {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Title:    {}", self.title)?;
        writeln!(f, "Subject:  {}", self.subject)?;
        writeln!(f, "Author:   {}", self.author)?;
        writeln!(f, "Keywords: {}", self.keywords)?;
        write!(f, "Creator:  {}", self.creator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSection {
    pub heading: &'static str,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDocument {
    pub properties: DocumentProperties,
    pub stamp: IssueStamp,
    pub sections: Vec<DocumentSection>,
    pub breakdown: Vec<(&'static str, String)>,
    pub total: String,
}

impl QuoteDocument {
    pub const TITLE: &'static str = "MOTOR INSURANCE QUOTATION";
    pub const BREAKDOWN_HEADING: &'static str = "PREMIUM BREAKDOWN";
    pub const FOOTER: [&'static str; 2] = [
        "This is a computer generated quotation.",
        "For official use only.",
    ];

    pub fn new(
        input: &QuotationInput,
        breakdown: &PremiumBreakdown,
        stamp: IssueStamp,
    ) -> Self {
        let sections = vec![
            DocumentSection {
                heading: "INSURED INFORMATION",
                lines: vec![
                    format!("Name: {} {}", input.salutation, input.insured_name),
                    format!("Vehicle Type: {}", input.policy_type),
                    format!("Vehicle Number: {}", input.vehicle_no),
                    format!("Seating Capacity: {}", input.seating_capacity),
                    format!("Vehicle Value: {}", format_rupees(input.vehicle_value)),
                    format!("Net Rate: {}", input.net_rate_display()),
                ],
            },
            DocumentSection {
                heading: "ADDITIONAL COVERS",
                lines: vec![
                    format!("Flood & Natural Disasters: {}", input.flood_cover),
                    format!("SRCC (Strike, Riot): {}", input.srcc_cover),
                    format!("Terrorism Cover: {}", input.tc_cover),
                    format!("Exclusion Cover: {}", input.exclusion_cover),
                ],
            },
            DocumentSection {
                heading: "COVER AMOUNTS",
                lines: vec![
                    format!("Air Bag Cover: {}", format_rupees(input.airbag_cover)),
                    format!("Windscreen Cover: {}", format_rupees(input.windscreen_cover)),
                    format!("Towing Charges: {}", format_rupees(input.towing_charges)),
                    format!("3rd Party Damage: {}", format_rupees(input.third_party_damage)),
                ],
            },
        ];

        let formatted = breakdown.formatted();

        Self {
            properties: DocumentProperties::default(),
            stamp,
            sections,
            breakdown: formatted
                .items
                .iter()
                .map(|(item, amount)| (item.label(), amount.clone()))
                .collect(),
            total: format!("Rs. {}", formatted.total),
        }
    }

    /// File name for this document, e.g. `Insurance_Quote_MOB45445123.txt`,
    /// or `Insurance_Quote_MOB45445123_002.txt` within a batch.
    pub fn file_name(&self) -> String {
        format!(
            "Insurance_Quote_{}{}.txt",
            self.stamp.quote_id,
            self.stamp.file_suffix()
        )
    }

    /// Lays the document out as fixed-width text.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QuoteDocument {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let width = PAGE_WIDTH;
        let rule = "=".repeat(width);
        let thin_rule = "-".repeat(width);

        writeln!(f, "{:^width$}", Self::TITLE)?;
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            spread(
                &format!("Quotation No: {}", self.stamp.quote_id),
                &format!("Date: {}", self.stamp.date_display()),
            )
        )?;
        let time = format!("Time: {}", self.stamp.time_display());
        writeln!(f, "{time:>width$}")?;
        writeln!(f, "{rule}")?;

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.heading)?;
            for line in &section.lines {
                writeln!(f, "    {line}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", Self::BREAKDOWN_HEADING)?;
        writeln!(f, "{thin_rule}")?;
        writeln!(f, "{}", spread("  Description", "Amount (Rs.)  "))?;
        writeln!(f, "{thin_rule}")?;
        for (label, amount) in &self.breakdown {
            writeln!(f, "{}", spread(&format!("  {label}"), &format!("{amount}  ")))?;
        }
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", spread("  TOTAL PREMIUM", &format!("{}  ", self.total)))?;
        writeln!(f)?;

        for line in Self::FOOTER {
            writeln!(f, "{line:^width$}")?;
        }

        writeln!(f)?;
        writeln!(f, "{thin_rule}")?;
        writeln!(f, "{}", self.properties)
    }
}

/// Places `left` and `right` at the two edges of a page-wide line.
fn spread(
    left: &str,
    right: &str,
) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = PAGE_WIDTH.saturating_sub(used).max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}
