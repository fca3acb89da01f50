//! CSV loader for the vehicle registration dataset.

use super::columns;
use crate::error::{AdvisorError, ErrorContext, Result};
use crate::model::{VehicleCollection, VehicleRecord, VehicleType};
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinate pattern of the `Vehicle Location` column: `POINT (lon lat)`.
static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"POINT \((-?[\d.]+) (-?[\d.]+)\)").expect("static regex"));

/// Column-name → field-index lookup built from the (trimmed) header row.
struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_string(), idx))
            .collect();
        Self { positions }
    }

    /// Trimmed, non-empty cell for the named column, if both exist.
    fn field<'r>(&self, record: &'r csv::StringRecord, column: &str) -> Option<&'r str> {
        let idx = *self.positions.get(column)?;
        let raw = record.get(idx)?.trim();
        if raw.is_empty() {
            None
        } else {
            Some(raw)
        }
    }

    fn owned_field(&self, record: &csv::StringRecord, column: &str) -> Option<String> {
        self.field(record, column).map(str::to_string)
    }

    /// Numeric cell coerced to `f64`; unparsable values become `None`.
    fn numeric_field(&self, record: &csv::StringRecord, column: &str) -> Option<f64> {
        self.field(record, column)?
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// Year cell coerced to `u16`; accepts integral float spellings.
    fn year_field(&self, record: &csv::StringRecord, column: &str) -> Option<u16> {
        let value = self.numeric_field(record, column)?;
        if (0.0..=f64::from(u16::MAX)).contains(&value) {
            Some(value as u16)
        } else {
            None
        }
    }
}

/// Load the registration dataset from a CSV file.
///
/// A missing or unreadable file is fatal; malformed cells are not. Rows
/// missing make, model, or vehicle type are dropped and counted on the
/// returned collection.
pub fn load_dataset(path: &Path) -> Result<VehicleCollection> {
    let file = File::open(path).map_err(|e| AdvisorError::io(path, e))?;
    let (records, skipped) = read_records(BufReader::new(file))
        .with_context(|| format!("at {}", path.display()))?;

    tracing::debug!(
        rows = records.len(),
        skipped,
        path = %path.display(),
        "Loaded registration dataset"
    );

    Ok(VehicleCollection::from_records(records)
        .with_source(path)
        .with_skipped_rows(skipped))
}

/// Parse a dataset from in-memory CSV content.
pub fn parse_dataset_str(content: &str) -> Result<VehicleCollection> {
    let (records, skipped) = read_records(content.as_bytes())?;
    Ok(VehicleCollection::from_records(records).with_skipped_rows(skipped))
}

fn read_records<R: Read>(reader: R) -> Result<(Vec<VehicleRecord>, usize)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let index = HeaderIndex::from_headers(&headers);

    let mut records = Vec::new();
    let mut skipped = 0_usize;

    for row in csv_reader.records() {
        let row = row?;
        match decode_record(&index, &row) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    Ok((records, skipped))
}

/// Decode one CSV row; returns `None` when essential identity fields are
/// missing and the row must be dropped.
fn decode_record(index: &HeaderIndex, row: &csv::StringRecord) -> Option<VehicleRecord> {
    let make = index.owned_field(row, columns::MAKE)?;
    let model = index.owned_field(row, columns::MODEL)?;
    let vehicle_type = VehicleType::parse(index.field(row, columns::VEHICLE_TYPE)?);

    let mut record = VehicleRecord::new(make, model, vehicle_type);
    record.model_year = index.year_field(row, columns::MODEL_YEAR);
    record.electric_range = index.numeric_field(row, columns::ELECTRIC_RANGE);
    record.base_msrp = index.numeric_field(row, columns::BASE_MSRP);
    record.cafv_eligibility = index.owned_field(row, columns::CAFV_ELIGIBILITY);
    record.county = index.owned_field(row, columns::COUNTY);
    record.city = index.owned_field(row, columns::CITY);
    record.state = index.owned_field(row, columns::STATE);

    if let Some(location) = index.field(row, columns::VEHICLE_LOCATION) {
        (record.longitude, record.latitude) = parse_location(location);
    }

    Some(record)
}

/// Extract (longitude, latitude) from a `POINT (lon lat)` cell.
fn parse_location(raw: &str) -> (Option<f64>, Option<f64>) {
    let Some(captures) = LOCATION_RE.captures(raw) else {
        return (None, None);
    };
    let lon = captures.get(1).and_then(|m| m.as_str().parse().ok());
    let lat = captures.get(2).and_then(|m| m.as_str().parse().ok());
    (lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "County,City,State,Model Year,Make,Model,Electric Vehicle Type,\
Clean Alternative Fuel Vehicle (CAFV) Eligibility,Electric Range,Base MSRP,Vehicle Location";

    fn dataset(rows: &[&str]) -> VehicleCollection {
        let content = format!("{HEADER}\n{}\n", rows.join("\n"));
        parse_dataset_str(&content).expect("parse dataset")
    }

    #[test]
    fn test_basic_row() {
        let collection = dataset(&[
            "King,Seattle,WA,2021,TESLA,MODEL 3,Battery Electric Vehicle (BEV),\
Clean Alternative Fuel Vehicle Eligible,272,42990,POINT (-122.33 47.61)",
        ]);

        assert_eq!(collection.len(), 1);
        let v = &collection.records()[0];
        assert_eq!(v.make, "TESLA");
        assert_eq!(v.model, "MODEL 3");
        assert_eq!(v.model_year, Some(2021));
        assert_eq!(v.electric_range, Some(272.0));
        assert_eq!(v.base_msrp, Some(42_990.0));
        assert_eq!(v.vehicle_type, VehicleType::BatteryElectric);
        assert!(v.is_cafv_eligible());
        assert_eq!(v.longitude, Some(-122.33));
        assert_eq!(v.latitude, Some(47.61));
    }

    #[test]
    fn test_numeric_coercion_failures_become_none() {
        let collection = dataset(&[
            "King,Seattle,WA,unknown,NISSAN,LEAF,Battery Electric Vehicle (BEV),,n/a,,",
        ]);

        let v = &collection.records()[0];
        assert_eq!(v.model_year, None);
        assert_eq!(v.electric_range, None);
        assert_eq!(v.base_msrp, None);
        assert_eq!(v.cafv_eligibility, None);
    }

    #[test]
    fn test_rows_missing_essentials_are_dropped() {
        let collection = dataset(&[
            "King,Seattle,WA,2020,,LEAF,Battery Electric Vehicle (BEV),,150,,",
            "King,Seattle,WA,2020,NISSAN,,Battery Electric Vehicle (BEV),,150,,",
            "King,Seattle,WA,2020,NISSAN,LEAF,,,150,,",
            "King,Seattle,WA,2020,NISSAN,LEAF,Battery Electric Vehicle (BEV),,150,,",
        ]);

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.skipped_rows(), 3);
    }

    #[test]
    fn test_absent_columns_tolerated() {
        let content = "Make,Model,Electric Vehicle Type\nKIA,EV6,Battery Electric Vehicle (BEV)\n";
        let collection = parse_dataset_str(content).expect("parse dataset");

        assert_eq!(collection.len(), 1);
        let v = &collection.records()[0];
        assert_eq!(v.electric_range, None);
        assert_eq!(v.base_msrp, None);
        assert_eq!(v.county, None);
    }

    #[test]
    fn test_header_whitespace_trimmed() {
        let content =
            " Make , Model , Electric Vehicle Type \nKIA,EV6,Battery Electric Vehicle (BEV)\n";
        let collection = parse_dataset_str(content).expect("parse dataset");
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        let collection = parse_dataset_str(&format!("{HEADER}\n")).expect("parse dataset");
        assert!(collection.is_empty());
        assert_eq!(collection.skipped_rows(), 0);
    }

    #[test]
    fn test_parse_location_rejects_garbage() {
        assert_eq!(parse_location("not a point"), (None, None));
        assert_eq!(
            parse_location("POINT (-122.1 47.2)"),
            (Some(-122.1), Some(47.2))
        );
    }
}
