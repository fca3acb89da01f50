//! Deterministic aggregations over a loaded dataset.
//!
//! All groupings are reproducible: counts sort descending with first-seen
//! order breaking ties, and yearly series sort ascending by year.

use crate::model::VehicleCollection;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Options controlling the summary shape.
#[derive(Debug, Clone, Copy)]
pub struct StatsOptions {
    /// Minimum model year included in yearly series
    pub min_year: u16,
    /// Number of entries kept in top-makes and catalog listings
    pub top_n: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            min_year: 2010,
            top_n: 10,
        }
    }
}

/// Share of one vehicle type in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeShare {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

/// Registration count for one manufacturer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeCount {
    pub make: String,
    pub count: usize,
}

/// Registration count for one model year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: u16,
    pub count: usize,
}

/// Average and maximum electric range for one model year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeTrend {
    pub year: u16,
    pub mean_range: f64,
    pub max_range: f64,
}

/// Aggregated range statistics for one "Make Model" pairing, computed over
/// rows with a positive electric range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub vehicle: String,
    pub mean_range: f64,
    pub count: usize,
}

/// Percentage of rows carrying each optional field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldCoverage {
    pub msrp: f64,
    pub electric_range: f64,
    pub model_year: f64,
    pub cafv_eligibility: f64,
    pub location: f64,
}

/// Full dataset summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_vehicles: usize,
    pub manufacturer_count: usize,
    /// Mean over rows with a known electric range (zeros included)
    pub average_range: Option<f64>,
    pub county_count: usize,
    pub type_distribution: Vec<TypeShare>,
    pub top_makes: Vec<MakeCount>,
    pub yearly_counts: Vec<YearCount>,
    pub range_trend: Vec<RangeTrend>,
    pub catalog: Vec<CatalogEntry>,
    pub coverage: FieldCoverage,
}

/// Summarize a loaded dataset.
#[must_use]
pub fn summarize(collection: &VehicleCollection, options: &StatsOptions) -> DatasetSummary {
    let total = collection.len();

    let mut type_counts: IndexMap<String, usize> = IndexMap::new();
    let mut make_counts: IndexMap<String, usize> = IndexMap::new();
    let mut yearly: BTreeMap<u16, usize> = BTreeMap::new();
    let mut trend: BTreeMap<u16, (f64, usize, f64)> = BTreeMap::new();
    let mut catalog: IndexMap<String, (f64, usize)> = IndexMap::new();
    let mut counties: HashSet<String> = HashSet::new();

    let mut range_sum = 0.0;
    let mut range_count = 0_usize;
    let mut with_msrp = 0_usize;
    let mut with_year = 0_usize;
    let mut with_cafv = 0_usize;
    let mut with_location = 0_usize;

    for vehicle in collection {
        *type_counts
            .entry(vehicle.vehicle_type.label().to_string())
            .or_insert(0) += 1;
        *make_counts.entry(vehicle.make.clone()).or_insert(0) += 1;

        if let Some(county) = &vehicle.county {
            counties.insert(county.clone());
        }

        if let Some(range) = vehicle.electric_range {
            range_sum += range;
            range_count += 1;

            if range > 0.0 {
                let entry = catalog
                    .entry(vehicle.display_name())
                    .or_insert((0.0, 0));
                entry.0 += range;
                entry.1 += 1;
            }
        }

        if let Some(year) = vehicle.model_year {
            with_year += 1;
            if year >= options.min_year {
                *yearly.entry(year).or_insert(0) += 1;
                if let Some(range) = vehicle.electric_range {
                    let entry = trend.entry(year).or_insert((0.0, 0, 0.0));
                    entry.0 += range;
                    entry.1 += 1;
                    entry.2 = entry.2.max(range);
                }
            }
        }

        if vehicle.base_msrp.is_some() {
            with_msrp += 1;
        }
        if vehicle.cafv_eligibility.is_some() {
            with_cafv += 1;
        }
        if vehicle.longitude.is_some() && vehicle.latitude.is_some() {
            with_location += 1;
        }
    }

    let mut type_distribution: Vec<TypeShare> = type_counts
        .into_iter()
        .map(|(label, count)| TypeShare {
            label,
            count,
            percentage: percentage(count, total),
        })
        .collect();
    type_distribution.sort_by(|a, b| b.count.cmp(&a.count));

    let mut top_makes: Vec<MakeCount> = make_counts
        .into_iter()
        .map(|(make, count)| MakeCount { make, count })
        .collect();
    top_makes.sort_by(|a, b| b.count.cmp(&a.count));
    top_makes.truncate(options.top_n);

    let yearly_counts = yearly
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect();

    let range_trend = trend
        .into_iter()
        .filter(|(_, (_, count, _))| *count > 0)
        .map(|(year, (sum, count, max))| RangeTrend {
            year,
            mean_range: sum / count as f64,
            max_range: max,
        })
        .collect();

    let mut catalog: Vec<CatalogEntry> = catalog
        .into_iter()
        .map(|(vehicle, (sum, count))| CatalogEntry {
            vehicle,
            mean_range: sum / count as f64,
            count,
        })
        .collect();
    catalog.sort_by(|a, b| {
        b.count.cmp(&a.count).then_with(|| {
            b.mean_range
                .partial_cmp(&a.mean_range)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
    catalog.truncate(options.top_n);

    DatasetSummary {
        total_vehicles: total,
        manufacturer_count: collection.distinct_makes(),
        average_range: if range_count > 0 {
            Some(range_sum / range_count as f64)
        } else {
            None
        },
        county_count: counties.len(),
        type_distribution,
        top_makes,
        yearly_counts,
        range_trend,
        catalog,
        coverage: FieldCoverage {
            msrp: percentage(with_msrp, total),
            electric_range: percentage(range_count, total),
            model_year: percentage(with_year, total),
            cafv_eligibility: percentage(with_cafv, total),
            location: percentage(with_location, total),
        },
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
