//! Spreadsheet export: the quotation laid out as a fixed six-column grid.
//!
//! Sections always appear in the same order and always carry the same rows,
//! whatever covers were ticked:
//!
//! | Section | Rows |
//! |---------|------|
//! | Header | title, quotation details with date, quote number with time |
//! | Insured information | title, name, vehicle, seating, value, rate |
//! | Additional covers | flood, SRCC, terrorism, exclusion |
//! | Cover amounts | air bag, windscreen, towing, third party |
//! | Premium breakdown | column header and the eight charges |
//! | Total | total premium |
//!
//! Sections are separated by one blank row.

use std::io::Write;

use quote_core::format::format_rupees;
use quote_core::{PremiumBreakdown, QuotationInput};

use crate::stamp::IssueStamp;

/// Number of columns in every grid row.
pub const COLUMNS: usize = 6;

/// The labelled blocks of a quotation sheet, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Header,
    InsuredInformation,
    AdditionalCovers,
    CoverAmounts,
    PremiumBreakdown,
    Total,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Header,
        SectionKind::InsuredInformation,
        SectionKind::AdditionalCovers,
        SectionKind::CoverAmounts,
        SectionKind::PremiumBreakdown,
        SectionKind::Total,
    ];

    /// Heading row text; the header and total sections carry their own.
    pub fn heading(&self) -> Option<&'static str> {
        match self {
            Self::Header | Self::Total => None,
            Self::InsuredInformation => Some("INSURED INFORMATION"),
            Self::AdditionalCovers => Some("ADDITIONAL COVERS"),
            Self::CoverAmounts => Some("COVER AMOUNTS"),
            Self::PremiumBreakdown => Some("PREMIUM BREAKDOWN"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSection {
    pub kind: SectionKind,
    pub rows: Vec<Vec<String>>,
}

/// A quotation ready to be handed to a spreadsheet writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSheet {
    pub stamp: IssueStamp,
    pub sections: Vec<SheetSection>,
}

fn row<const N: usize>(cells: [&str; N]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

impl QuoteSheet {
    pub fn new(
        input: &QuotationInput,
        breakdown: &PremiumBreakdown,
        stamp: IssueStamp,
    ) -> Self {
        let sections = SectionKind::ALL
            .into_iter()
            .map(|kind| SheetSection {
                kind,
                rows: Self::section_rows(kind, input, breakdown, &stamp),
            })
            .collect();

        Self { stamp, sections }
    }

    fn section_rows(
        kind: SectionKind,
        input: &QuotationInput,
        breakdown: &PremiumBreakdown,
        stamp: &IssueStamp,
    ) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        if let Some(heading) = kind.heading() {
            rows.push(row([heading]));
        }

        match kind {
            SectionKind::Header => {
                let date = stamp.date_display();
                let time = stamp.time_display();
                rows.push(row(["MOTOR INSURANCE QUOTATION"]));
                rows.push(Vec::new());
                rows.push(row(["QUOTATION DETAILS", "", "", "DATE:", date.as_str()]));
                rows.push(row(["QUOTE NO:", stamp.quote_id.as_str(), "", "TIME:", time.as_str()]));
            }
            SectionKind::InsuredInformation => {
                rows.push(row(["Title:", input.salutation.as_str()]));
                rows.push(row(["Name:", input.insured_name.as_str()]));
                rows.push(row(["Vehicle Type:", input.policy_type.as_str()]));
                rows.push(row(["Vehicle No:", input.vehicle_no.as_str()]));
                rows.push(row(["Seating Capacity:", input.seating_capacity.as_str()]));
                rows.push(row(["Vehicle Value:", format_rupees(input.vehicle_value).as_str()]));
                rows.push(row(["Net Rate:", input.net_rate_display().as_str()]));
            }
            SectionKind::AdditionalCovers => {
                rows.push(row(["Flood Cover:", input.flood_cover.as_str()]));
                rows.push(row(["SRCC Cover:", input.srcc_cover.as_str()]));
                rows.push(row(["Terrorism Cover:", input.tc_cover.as_str()]));
                rows.push(row(["Exclusion Cover:", input.exclusion_cover.as_str()]));
            }
            SectionKind::CoverAmounts => {
                rows.push(row(["Air Bag Cover:", format_rupees(input.airbag_cover).as_str()]));
                rows.push(row(["Windscreen Cover:", format_rupees(input.windscreen_cover).as_str()]));
                rows.push(row(["Towing Charges:", format_rupees(input.towing_charges).as_str()]));
                rows.push(row(["3rd Party Damage:", format_rupees(input.third_party_damage).as_str()]));
            }
            SectionKind::PremiumBreakdown => {
                rows.push(row(["Description", "Amount (Rs.)"]));
                let formatted = breakdown.formatted();
                for (item, amount) in &formatted.items {
                    rows.push(row([item.label(), amount.as_str()]));
                }
            }
            SectionKind::Total => {
                rows.push(row(["TOTAL PREMIUM", breakdown.formatted().total.as_str()]));
            }
        }

        rows
    }

    /// File name for this sheet, e.g. `Motor_Insurance_Quote_20240609.csv`,
    /// or `Motor_Insurance_Quote_20240609_002.csv` within a batch.
    pub fn file_name(&self) -> String {
        format!(
            "Motor_Insurance_Quote_{}{}.csv",
            self.stamp.file_date(),
            self.stamp.file_suffix()
        )
    }

    /// Flattens the sections into rows of exactly [`COLUMNS`] cells, with a
    /// blank row between sections.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::new();
        for (idx, section) in self.sections.iter().enumerate() {
            if idx > 0 {
                grid.push(vec![String::new(); COLUMNS]);
            }
            for cells in &section.rows {
                let mut padded = cells.clone();
                padded.resize(COLUMNS, String::new());
                grid.push(padded);
            }
        }
        grid
    }

    /// Writes the grid as CSV.
    pub fn write_csv<W: Write>(
        &self,
        writer: W,
    ) -> Result<(), csv::Error> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_writer(writer);

        for cells in self.to_grid() {
            csv_writer.write_record(&cells)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use quote_core::{CoverFlag, PremiumCalculator, QuoteId};

    fn stamp() -> IssueStamp {
        IssueStamp {
            quote_id: QuoteId::from_timestamp_millis(1_717_945_445_123),
            issued_at: NaiveDate::from_ymd_opt(2024, 6, 9)
                .unwrap()
                .and_hms_opt(15, 4, 5)
                .unwrap(),
            sequence: None,
        }
    }

    fn sheet_for(input: &QuotationInput) -> QuoteSheet {
        let breakdown = PremiumCalculator::default().calculate(input);
        QuoteSheet::new(input, &breakdown, stamp())
    }

    fn first_column(sheet: &QuoteSheet) -> Vec<String> {
        sheet.to_grid().into_iter().map(|cells| cells[0].clone()).collect()
    }

    #[test]
    fn sections_in_fixed_order() {
        let kinds: Vec<SectionKind> = sheet_for(&QuotationInput::example())
            .sections
            .iter()
            .map(|s| s.kind)
            .collect();

        assert_eq!(kinds, SectionKind::ALL.to_vec());
    }

    #[test]
    fn grid_rows_are_six_wide() {
        let grid = sheet_for(&QuotationInput::example()).to_grid();

        assert!(grid.iter().all(|cells| cells.len() == COLUMNS));
    }

    #[test]
    fn grid_layout_for_example() {
        let grid = sheet_for(&QuotationInput::example()).to_grid();

        assert_eq!(grid.len(), 38);
        assert_eq!(grid[0][0], "MOTOR INSURANCE QUOTATION");
        assert_eq!(grid[2], row(["QUOTATION DETAILS", "", "", "DATE:", "6/9/2024", ""]));
        assert_eq!(grid[3], row(["QUOTE NO:", "MOB45445123", "", "TIME:", "3:04:05 PM", ""]));
        assert_eq!(grid[12][..2].to_vec(), row(["Net Rate:", "0.65%"]));
        assert_eq!(grid[37][..2].to_vec(), row(["TOTAL PREMIUM", "9,441.81"]));
    }

    #[test]
    fn breakdown_rows_carry_formatted_amounts() {
        let grid = sheet_for(&QuotationInput::example()).to_grid();
        let start = grid
            .iter()
            .position(|cells| cells[0] == "Description")
            .unwrap();

        let rows: Vec<(String, String)> = grid[start + 1..start + 9]
            .iter()
            .map(|cells| (cells[0].clone(), cells[1].clone()))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("Net Premium".to_string(), "6,500.00".to_string()),
                ("SRCC".to_string(), "130.00".to_string()),
                ("Terrorism Cover".to_string(), "97.50".to_string()),
                ("Road Safety Fund".to_string(), "65.00".to_string()),
                ("Policy Fee".to_string(), "1,000.00".to_string()),
                ("NBT".to_string(), "166.66".to_string()),
                ("Stamp Fee".to_string(), "50.00".to_string()),
                ("VAT".to_string(), "1,432.65".to_string()),
            ]
        );
    }

    #[test]
    fn row_order_does_not_depend_on_covers() {
        let plain = QuotationInput::default();
        let all_covers = QuotationInput {
            flood_cover: CoverFlag::Yes,
            srcc_cover: CoverFlag::Yes,
            tc_cover: CoverFlag::Yes,
            exclusion_cover: CoverFlag::Yes,
            ..QuotationInput::default()
        };

        assert_eq!(first_column(&sheet_for(&plain)), first_column(&sheet_for(&all_covers)));
    }

    #[test]
    fn cover_flags_render_yes_no() {
        let grid = sheet_for(&QuotationInput::example()).to_grid();
        let flood = grid.iter().find(|cells| cells[0] == "Flood Cover:").unwrap();
        let terrorism = grid.iter().find(|cells| cells[0] == "Terrorism Cover:").unwrap();

        assert_eq!(flood[1], "Yes");
        assert_eq!(terrorism[1], "No");
    }

    #[test]
    fn file_name_uses_issue_date() {
        assert_eq!(
            sheet_for(&QuotationInput::example()).file_name(),
            "Motor_Insurance_Quote_20240609.csv"
        );
    }

    #[test]
    fn file_name_numbers_batch_rows() {
        let input = QuotationInput::example();
        let breakdown = PremiumCalculator::default().calculate(&input);
        let sheet = QuoteSheet::new(&input, &breakdown, stamp().with_sequence(2));

        assert_eq!(sheet.file_name(), "Motor_Insurance_Quote_20240609_002.csv");
    }

    #[test]
    fn write_csv_quotes_cells_with_commas() {
        let mut out = Vec::new();
        sheet_for(&QuotationInput::example()).write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("MOTOR INSURANCE QUOTATION,,,,,\n"));
        assert!(text.contains("Net Premium,\"6,500.00\",,,,"));
        assert!(text.trim_end().ends_with("TOTAL PREMIUM,\"9,441.81\",,,,"));
    }
}
