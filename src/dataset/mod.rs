//! Registration dataset ingestion and aggregation.
//!
//! The loader reads the raw registration CSV into the normalized
//! [`VehicleCollection`](crate::model::VehicleCollection) model; the stats
//! module derives deterministic summaries from a loaded collection.
//!
//! Any column may be absent from the input: missing cells coerce to `None`
//! and only rows without the essential identity fields (make, model,
//! vehicle type) are dropped.

mod loader;
mod stats;

pub use loader::{load_dataset, parse_dataset_str};
pub use stats::{
    summarize, CatalogEntry, DatasetSummary, FieldCoverage, MakeCount, RangeTrend, StatsOptions,
    TypeShare, YearCount,
};

/// Dataset column headers, matched after whitespace trimming.
pub mod columns {
    pub const MAKE: &str = "Make";
    pub const MODEL: &str = "Model";
    pub const MODEL_YEAR: &str = "Model Year";
    pub const ELECTRIC_RANGE: &str = "Electric Range";
    pub const BASE_MSRP: &str = "Base MSRP";
    pub const VEHICLE_TYPE: &str = "Electric Vehicle Type";
    pub const CAFV_ELIGIBILITY: &str = "Clean Alternative Fuel Vehicle (CAFV) Eligibility";
    pub const COUNTY: &str = "County";
    pub const CITY: &str = "City";
    pub const STATE: &str = "State";
    pub const VEHICLE_LOCATION: &str = "Vehicle Location";
}
