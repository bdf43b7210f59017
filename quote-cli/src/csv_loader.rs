//! CSV loader for batches of quotation forms.
//!
//! ## CSV Format
//!
//! Each row is one quotation form. Headers are the form field names; column
//! order does not matter and every column is optional. An empty cell is the
//! same as an untouched input. Checkbox cells are read as ticked or not, the
//! way a browser submits them. Other cells are kept as raw text and coerced
//! later by `QuotationInput::normalize`, so an unreadable amount falls back
//! to its default rather than failing the load.
//!
//! | Column | Kind | Notes |
//! |----------------------|----------|----------------------------------------|
//! | `salutation` | text | e.g. `M/S`, `Mr.` |
//! | `insured_name` | text | |
//! | `policy_type` | text | e.g. `Private Car` |
//! | `vehicle_no` | text | |
//! | `seating_capacity` | text | display only |
//! | `vehicle_value` | amount | commas allowed, e.g. `1,000,000` |
//! | `net_rate` | amount | percent, blank means `0.65` |
//! | `flood_cover` | checkbox | `yes`, `on`, `true`, `1`, `x` tick it |
//! | `srcc_cover` | checkbox | |
//! | `tc_cover` | checkbox | |
//! | `exclusion_cover` | checkbox | |
//! | `airbag_cover` | amount | |
//! | `windscreen_cover` | amount | |
//! | `towing_charges` | amount | |
//! | `third_party_damage` | amount | |
//!
//! ### Example
//!
//! ```csv
//! insured_name,vehicle_value,net_rate,srcc_cover
//! John Doe,"1,000,000",0.65,yes
//! ```
use std::path::{Path, PathBuf};

use quote_core::coerce::is_checked;
use quote_core::{Field, RawFields};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CsvRow {
    salutation: Option<String>,
    insured_name: Option<String>,
    policy_type: Option<String>,
    vehicle_no: Option<String>,
    seating_capacity: Option<String>,
    vehicle_value: Option<String>,
    net_rate: Option<String>,
    flood_cover: Option<String>,
    srcc_cover: Option<String>,
    tc_cover: Option<String>,
    exclusion_cover: Option<String>,
    airbag_cover: Option<String>,
    windscreen_cover: Option<String>,
    towing_charges: Option<String>,
    third_party_damage: Option<String>,
}

impl CsvRow {
    fn into_raw_fields(self) -> RawFields {
        let cells = [
            (Field::Salutation, self.salutation),
            (Field::InsuredName, self.insured_name),
            (Field::PolicyType, self.policy_type),
            (Field::VehicleNo, self.vehicle_no),
            (Field::SeatingCapacity, self.seating_capacity),
            (Field::VehicleValue, self.vehicle_value),
            (Field::NetRate, self.net_rate),
            (Field::FloodCover, self.flood_cover),
            (Field::SrccCover, self.srcc_cover),
            (Field::TcCover, self.tc_cover),
            (Field::ExclusionCover, self.exclusion_cover),
            (Field::AirbagCover, self.airbag_cover),
            (Field::WindscreenCover, self.windscreen_cover),
            (Field::TowingCharges, self.towing_charges),
            (Field::ThirdPartyDamage, self.third_party_damage),
        ];

        let mut fields = RawFields::new();
        for (field, value) in cells {
            let Some(value) = value else {
                continue;
            };
            if field.is_checkbox() {
                fields.set_checked(field, is_checked(&value));
            } else {
                fields.set(field, value);
            }
        }
        fields
    }
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading a batch file.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV is structurally invalid or has a column that is not a form
    /// field.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Parses CSV text into raw forms, one per data row, in file order.
///
/// # Errors
///
/// [`CsvLoadError::Parse`] if the CSV is malformed or a header is not a
/// known field name.
pub fn load_from_str(input: &str) -> Result<Vec<RawFields>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let forms = reader
        .deserialize::<CsvRow>()
        .map(|result| result.map(CsvRow::into_raw_fields))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(rows = forms.len(), "quotation batch parsed");
    Ok(forms)
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<RawFields>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
