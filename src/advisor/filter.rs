//! Hard-constraint candidate filtering.
//!
//! The filter applies the non-compensatory constraints (budget, minimum
//! range, and the optional refinements) before any scoring happens. All
//! active constraints are AND-combined: a vehicle must pass every one to
//! become a candidate.

use super::profile::{CafvPreference, PreferenceProfile, MSRP_SENTINEL};
use crate::model::{VehicleCollection, VehicleRecord};
use serde::{Deserialize, Serialize};

/// Applies a profile's hard constraints to a vehicle collection.
#[derive(Debug, Clone)]
pub struct CandidateFilter<'a> {
    profile: &'a PreferenceProfile,
}

impl<'a> CandidateFilter<'a> {
    /// Create a filter for the given profile.
    #[must_use]
    pub fn new(profile: &'a PreferenceProfile) -> Self {
        Self { profile }
    }

    /// Reduce the collection to candidates, preserving load order.
    ///
    /// An empty result is a valid outcome; callers surface it with a
    /// [`RelaxationHint`] rather than treating it as an error.
    #[must_use]
    pub fn apply(&self, vehicles: &VehicleCollection) -> Vec<VehicleRecord> {
        vehicles
            .iter()
            .filter(|v| self.matches(v))
            .cloned()
            .collect()
    }

    /// Check a single vehicle against every active constraint.
    #[must_use]
    pub fn matches(&self, vehicle: &VehicleRecord) -> bool {
        self.matches_budget(vehicle)
            && self.matches_range(vehicle)
            && self.matches_type(vehicle)
            && self.matches_brand(vehicle)
            && self.matches_year(vehicle)
            && self.matches_cafv(vehicle)
    }

    /// Budget is an inclusive interval; unknown MSRP takes the sentinel
    /// value, so it only survives tiers whose upper bound reaches it.
    fn matches_budget(&self, vehicle: &VehicleRecord) -> bool {
        let (min, max) = self.profile.budget.bounds();
        let price = vehicle.base_msrp.unwrap_or(MSRP_SENTINEL);
        price >= min && price <= max
    }

    /// Unknown range counts as zero, so it only passes a zero floor.
    fn matches_range(&self, vehicle: &VehicleRecord) -> bool {
        let min_range = f64::from(self.profile.min_range());
        vehicle.electric_range.unwrap_or(0.0) >= min_range
    }

    fn matches_type(&self, vehicle: &VehicleRecord) -> bool {
        match &self.profile.vehicle_type {
            Some(wanted) => &vehicle.vehicle_type == wanted,
            None => true,
        }
    }

    fn matches_brand(&self, vehicle: &VehicleRecord) -> bool {
        if self.profile.brands.is_empty() {
            return true;
        }
        let make_lower = vehicle.make.to_lowercase();
        self.profile
            .brands
            .iter()
            .any(|b| b.to_lowercase() == make_lower)
    }

    fn matches_year(&self, vehicle: &VehicleRecord) -> bool {
        match self.profile.min_year {
            Some(min_year) => vehicle.model_year.is_some_and(|y| y >= min_year),
            None => true,
        }
    }

    fn matches_cafv(&self, vehicle: &VehicleRecord) -> bool {
        match self.profile.cafv {
            CafvPreference::Require => vehicle.is_cafv_eligible(),
            // Prefer only boosts the composite score later.
            CafvPreference::DontCare | CafvPreference::Prefer => true,
        }
    }
}

/// Suggested constraint relaxation when a filter run comes back empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaxationHint {
    /// Range floor that produced the empty result
    pub required_range: u32,
    /// Range floor lowered by one fixed 50-mile step
    pub relaxed_range: u32,
    /// Label of the budget tier that was in effect
    pub budget_label: String,
    /// Label of the next wider budget tier
    pub widened_budget_label: String,
}

impl RelaxationHint {
    /// Build the hint for a profile whose filter matched nothing.
    #[must_use]
    pub fn for_profile(profile: &PreferenceProfile) -> Self {
        let required_range = profile.min_range();
        Self {
            required_range,
            relaxed_range: required_range.saturating_sub(50),
            budget_label: profile.budget.label().to_string(),
            widened_budget_label: profile.budget.widened().label().to_string(),
        }
    }

    /// One-line human suggestion.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Try adjusting: lower the range requirement ({} mi -> {} mi) or widen the budget ({} -> {})",
            self.required_range, self.relaxed_range, self.budget_label, self.widened_budget_label
        )
    }
}
