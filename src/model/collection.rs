//! Load-ordered collections of vehicle records.

use super::VehicleRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::xxh3_64;

/// A loaded registration dataset.
///
/// Records keep their load order; every tie-break downstream (ranking,
/// alternative selection) falls back to this order, which makes results
/// reproducible for a given input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleCollection {
    /// Records in load order
    vehicles: Vec<VehicleRecord>,
    /// Path the dataset was loaded from, if any
    source: Option<PathBuf>,
    /// Rows dropped during loading for missing essential fields
    skipped_rows: usize,
    /// Content fingerprint for quick equality checks
    content_hash: u64,
}

impl VehicleCollection {
    /// Build a collection from records, computing the content fingerprint.
    #[must_use]
    pub fn from_records(vehicles: Vec<VehicleRecord>) -> Self {
        let mut collection = Self {
            vehicles,
            source: None,
            skipped_rows: 0,
            content_hash: 0,
        };
        collection.calculate_content_hash();
        collection
    }

    /// Attach the source path the dataset was loaded from.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Record how many rows were dropped during loading.
    #[must_use]
    pub fn with_skipped_rows(mut self, skipped: usize) -> Self {
        self.skipped_rows = skipped;
        self
    }

    /// Records in load order.
    #[must_use]
    pub fn records(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    /// Iterate over records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, VehicleRecord> {
        self.vehicles.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Source path, if the collection was loaded from a file.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Rows dropped during loading for missing essential fields.
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Content fingerprint of the loaded records.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }

    /// Number of distinct manufacturers (case-insensitive).
    #[must_use]
    pub fn distinct_makes(&self) -> usize {
        let mut makes: Vec<String> = self
            .vehicles
            .iter()
            .map(|v| v.make.to_lowercase())
            .collect();
        makes.sort_unstable();
        makes.dedup();
        makes.len()
    }

    /// Recalculate the content fingerprint from the current records.
    fn calculate_content_hash(&mut self) {
        let mut hasher_input = Vec::new();
        for record in &self.vehicles {
            if let Ok(encoded) = serde_json::to_vec(record) {
                hasher_input.extend(encoded);
            }
        }
        self.content_hash = xxh3_64(&hasher_input);
    }
}

impl<'a> IntoIterator for &'a VehicleCollection {
    type Item = &'a VehicleRecord;
    type IntoIter = std::slice::Iter<'a, VehicleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VehicleType;

    fn record(make: &str, model: &str) -> VehicleRecord {
        VehicleRecord::new(make, model, VehicleType::BatteryElectric)
    }

    #[test]
    fn test_preserves_load_order() {
        let collection = VehicleCollection::from_records(vec![
            record("Tesla", "Model 3"),
            record("Nissan", "Leaf"),
            record("Tesla", "Model Y"),
        ]);
        let names: Vec<String> = collection.iter().map(VehicleRecord::display_name).collect();
        assert_eq!(names, ["Tesla Model 3", "Nissan Leaf", "Tesla Model Y"]);
    }

    #[test]
    fn test_distinct_makes_case_insensitive() {
        let collection = VehicleCollection::from_records(vec![
            record("TESLA", "Model 3"),
            record("Tesla", "Model Y"),
            record("Nissan", "Leaf"),
        ]);
        assert_eq!(collection.distinct_makes(), 2);
    }

    #[test]
    fn test_content_hash_tracks_records() {
        let a = VehicleCollection::from_records(vec![record("Tesla", "Model 3")]);
        let b = VehicleCollection::from_records(vec![record("Tesla", "Model 3")]);
        let c = VehicleCollection::from_records(vec![record("Tesla", "Model Y")]);

        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
    }

    #[test]
    fn test_empty_collection() {
        let collection = VehicleCollection::from_records(Vec::new());
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
        assert_eq!(collection.distinct_makes(), 0);
    }
}
