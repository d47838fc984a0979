//! AWG Wire Gauge Table
//!
//! Maps a required conductor diameter to the thinnest American Wire Gauge
//! conductor that is at least that thick. The table is an external
//! collaborator: the pipeline only sees a [`GaugeLookup`], so callers can
//! inject the built-in standard table, a table loaded from CSV, or any
//! closure.
//!
//! ## CSV Format
//!
//! Two columns are required, in any order, with extra columns ignored:
//!
//! ```text
//! awg,diameter_mm
//! 20,0.8118
//! 21,0.7229
//! ```
//!
//! Accepted headers are `awg` / `gauge` / `Numero AWG` for the designation
//! and `diameter_mm` / `Diâmetro (mm)` for the diameter.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

const GAUGE_HEADERS: [&str; 3] = ["awg", "gauge", "numero awg"];
const DIAMETER_HEADERS: [&str; 3] = ["diameter_mm", "diameter (mm)", "diâmetro (mm)"];

/// Standard AWG diameters (mm), d = 0.127 · 92^((36 - n) / 39)
const STANDARD_AWG: [(&str, f64); 44] = [
    ("4/0", 11.684),
    ("3/0", 10.4049),
    ("2/0", 9.2658),
    ("1/0", 8.2515),
    ("1", 7.3481),
    ("2", 6.5437),
    ("3", 5.8273),
    ("4", 5.1894),
    ("5", 4.6213),
    ("6", 4.1154),
    ("7", 3.6649),
    ("8", 3.2636),
    ("9", 2.9064),
    ("10", 2.5882),
    ("11", 2.3048),
    ("12", 2.0525),
    ("13", 1.8278),
    ("14", 1.6277),
    ("15", 1.4495),
    ("16", 1.2908),
    ("17", 1.1495),
    ("18", 1.0237),
    ("19", 0.9116),
    ("20", 0.8118),
    ("21", 0.7229),
    ("22", 0.6438),
    ("23", 0.5733),
    ("24", 0.5106),
    ("25", 0.4547),
    ("26", 0.4049),
    ("27", 0.3606),
    ("28", 0.3211),
    ("29", 0.2859),
    ("30", 0.2546),
    ("31", 0.2268),
    ("32", 0.2019),
    ("33", 0.1798),
    ("34", 0.1601),
    ("35", 0.1426),
    ("36", 0.127),
    ("37", 0.1131),
    ("38", 0.1007),
    ("39", 0.0897),
    ("40", 0.0799),
];

static STANDARD_TABLE: Lazy<AwgTable> = Lazy::new(|| AwgTable {
    rows: STANDARD_AWG
        .iter()
        .map(|(designation, diameter_mm)| WireGauge::new(*designation, *diameter_mm))
        .collect(),
});

/// Resolves a required conductor diameter to a wire gauge designation.
///
/// Implementations must be pure: the same diameter always yields the same
/// answer.
pub trait GaugeLookup {
    /// Designation of the smallest tabulated conductor with a diameter
    /// `>= diameter_mm`.
    fn lookup_gauge(&self, diameter_mm: f64) -> CalcResult<String>;
}

impl<F> GaugeLookup for F
where
    F: Fn(f64) -> CalcResult<String>,
{
    fn lookup_gauge(&self, diameter_mm: f64) -> CalcResult<String> {
        self(diameter_mm)
    }
}

/// One row of the gauge table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireGauge {
    /// Gauge designation (e.g. "21", "4/0")
    pub designation: String,
    /// Bare conductor diameter (mm)
    pub diameter_mm: f64,
}

impl WireGauge {
    pub fn new(designation: impl Into<String>, diameter_mm: f64) -> Self {
        WireGauge {
            designation: designation.into(),
            diameter_mm,
        }
    }
}

/// A wire gauge table. Row order is irrelevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwgTable {
    rows: Vec<WireGauge>,
}

impl AwgTable {
    /// Build a table from explicit rows. Fails on an empty table.
    pub fn from_rows(rows: Vec<WireGauge>) -> CalcResult<Self> {
        if rows.is_empty() {
            return Err(CalcError::invalid_input("awg_table", "0 rows", "Table must have at least one row"));
        }
        Ok(AwgTable { rows })
    }

    /// The built-in standard AWG table (4/0 to 40)
    pub fn standard() -> &'static AwgTable {
        &STANDARD_TABLE
    }

    /// Load a table from a CSV file.
    pub fn from_csv_path(path: &Path) -> CalcResult<Self> {
        let file = File::open(path)
            .map_err(|e| CalcError::file_error("open AWG table", path.display().to_string(), e.to_string()))?;
        Self::from_csv_reader(file)
    }

    /// Load a table from any CSV source.
    pub fn from_csv_reader<R: Read>(reader: R) -> CalcResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| CalcError::serialization(format!("AWG table header: {}", e)))?
            .clone();
        let gauge_col = find_column(&headers, &GAUGE_HEADERS).ok_or_else(|| CalcError::missing_field("awg"))?;
        let diameter_col =
            find_column(&headers, &DIAMETER_HEADERS).ok_or_else(|| CalcError::missing_field("diameter_mm"))?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| CalcError::serialization(format!("AWG table row {}: {}", index + 1, e)))?;
            let designation = record.get(gauge_col).unwrap_or_default();
            let raw_diameter = record.get(diameter_col).unwrap_or_default();
            let diameter_mm: f64 = raw_diameter.replace(',', ".").parse().map_err(|_| {
                CalcError::invalid_input(
                    format!("awg_table row {}", index + 1),
                    raw_diameter,
                    "Diameter must be a number",
                )
            })?;
            rows.push(WireGauge::new(designation, diameter_mm));
        }

        Self::from_rows(rows)
    }

    pub fn rows(&self) -> &[WireGauge] {
        &self.rows
    }

    /// The thickest conductor in the table
    pub fn largest(&self) -> Option<&WireGauge> {
        self.rows.iter().max_by(|a, b| a.diameter_mm.total_cmp(&b.diameter_mm))
    }

    /// The thinnest conductor with a diameter `>= diameter_mm`.
    ///
    /// # Example
    /// ```rust
    /// use trafo_core::tables::AwgTable;
    ///
    /// let gauge = AwgTable::standard().gauge_for_diameter(0.716).unwrap();
    /// assert_eq!(gauge.designation, "21");
    /// ```
    pub fn gauge_for_diameter(&self, diameter_mm: f64) -> CalcResult<&WireGauge> {
        self.rows
            .iter()
            .filter(|row| row.diameter_mm >= diameter_mm)
            .min_by(|a, b| a.diameter_mm.total_cmp(&b.diameter_mm))
            .ok_or_else(|| CalcError::WireGaugeNotFound {
                diameter_mm,
                largest_mm: self.largest().map(|row| row.diameter_mm).unwrap_or(0.0),
            })
    }
}

impl GaugeLookup for AwgTable {
    fn lookup_gauge(&self, diameter_mm: f64) -> CalcResult<String> {
        self.gauge_for_diameter(diameter_mm).map(|row| row.designation.clone())
    }
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| candidates.contains(&header.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> AwgTable {
        AwgTable::from_rows(vec![
            WireGauge::new("24", 0.5),
            WireGauge::new("20", 0.8),
            WireGauge::new("18", 1.0),
            WireGauge::new("16", 1.2),
        ])
        .unwrap()
    }

    #[test]
    fn test_rounds_up_to_next_diameter() {
        assert_eq!(small_table().lookup_gauge(0.9).unwrap(), "18");
    }

    #[test]
    fn test_exact_diameter_matches() {
        assert_eq!(small_table().lookup_gauge(1.2).unwrap(), "16");
        assert_eq!(small_table().lookup_gauge(0.5).unwrap(), "24");
    }

    #[test]
    fn test_too_thick_fails() {
        let err = small_table().lookup_gauge(1.3).unwrap_err();
        assert_eq!(err, CalcError::WireGaugeNotFound { diameter_mm: 1.3, largest_mm: 1.2 });
    }

    #[test]
    fn test_row_order_irrelevant() {
        let mut rows = small_table().rows().to_vec();
        rows.reverse();
        let reversed = AwgTable::from_rows(rows).unwrap();
        assert_eq!(reversed.lookup_gauge(0.9).unwrap(), "18");
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(AwgTable::from_rows(Vec::new()).is_err());
    }

    #[test]
    fn test_standard_table() {
        let table = AwgTable::standard();
        assert_eq!(table.rows().len(), 44);
        assert_eq!(table.largest().unwrap().designation, "4/0");
        assert_eq!(table.lookup_gauge(5.678).unwrap(), "3");
        assert_eq!(table.lookup_gauge(0.0799).unwrap(), "40");
        assert!(table.lookup_gauge(12.0).is_err());
    }

    #[test]
    fn test_csv_with_reference_headers() {
        let csv = "Numero AWG,Diâmetro (mm),Seção (mm2)\n18,1.0237,0.823\n20,0.8118,0.518\n";
        let table = AwgTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.lookup_gauge(0.9).unwrap(), "18");
    }

    #[test]
    fn test_csv_with_plain_headers() {
        let csv = "diameter_mm,awg\n0.5,24\n1.2,16\n";
        let table = AwgTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.lookup_gauge(0.6).unwrap(), "16");
    }

    #[test]
    fn test_csv_missing_column() {
        let csv = "awg,area_mm2\n18,0.823\n";
        let err = AwgTable::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert_eq!(err, CalcError::missing_field("diameter_mm"));
    }

    #[test]
    fn test_csv_bad_diameter() {
        let csv = "awg,diameter_mm\n18,thick\n";
        let err = AwgTable::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_closure_lookup() {
        let fixed = |_: f64| -> CalcResult<String> { Ok("10".to_string()) };
        assert_eq!(fixed.lookup_gauge(2.0).unwrap(), "10");
    }
}
