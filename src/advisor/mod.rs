//! Multi-criteria vehicle recommendation engine.
//!
//! The advisor mirrors how buyers actually decide: hard constraints first
//! (budget, range floor, optional refinements), then multi-criteria
//! scoring of whatever survives, then a brand-diverse set of alternatives
//! so the answer is never a single point.
//!
//! The whole computation is a pure function of the vehicle collection and
//! the preference profile; no state is held across calls.

mod alternatives;
mod filter;
mod profile;
mod scoring;

pub use alternatives::{diverse_alternatives, Alternative, AlternativeKind};
pub use filter::{CandidateFilter, RelaxationHint};
pub use profile::{
    BudgetTier, CafvPreference, Dimension, PreferenceProfile, PriorityLabel, RangeImportance,
    UseCase, WeightSet, MSRP_SENTINEL,
};
pub use scoring::{
    rank, ComponentScores, ScoreNormalizer, ScoredCandidate, CAFV_BONUS, NEUTRAL_SCORE,
};

use crate::model::VehicleCollection;
use serde::{Deserialize, Serialize};

/// Weight thresholds above which a dimension earns a "why this match"
/// reason line.
const PRICE_REASON_THRESHOLD: f64 = 0.35;
const RANGE_REASON_THRESHOLD: f64 = 0.35;
const VALUE_REASON_THRESHOLD: f64 = 0.20;
const NEWNESS_REASON_THRESHOLD: f64 = 0.20;

/// A complete recommendation for one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Best-scoring candidate
    pub top_match: ScoredCandidate,
    /// Canned "why this match" reasons, driven by the weight profile
    pub reasons: Vec<String>,
    /// Up to three brand-diverse alternatives, fixed slot order
    pub alternatives: Vec<Alternative>,
    /// Full ranking, best first (the top match is element zero)
    pub ranked: Vec<ScoredCandidate>,
    /// Weights that produced the ranking
    pub weights: WeightSet,
    /// Size of the filtered candidate set
    pub candidates_considered: usize,
}

/// Outcome when the hard constraints matched nothing.
///
/// This is a valid result, not an error: it carries the filter settings
/// that were in effect and a concrete relaxation suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoMatchReport {
    pub use_case: String,
    pub budget: String,
    pub range_importance: String,
    pub hint: RelaxationHint,
}

impl NoMatchReport {
    /// One-line human message.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "No vehicles match these criteria in the current dataset. {}",
            self.hint.message()
        )
    }
}

/// Result of a recommendation run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum RecommendOutcome {
    /// At least one candidate survived filtering
    Matches(Box<Recommendation>),
    /// The filters matched nothing
    NoMatches(NoMatchReport),
}

impl RecommendOutcome {
    /// Whether any candidate matched.
    #[must_use]
    pub fn has_matches(&self) -> bool {
        matches!(self, Self::Matches(_))
    }
}

/// The recommendation engine.
///
/// Stateless apart from the profile it was built with; `recommend` can be
/// called any number of times and always yields the same result for the
/// same collection.
#[derive(Debug, Clone)]
pub struct Advisor {
    profile: PreferenceProfile,
}

impl Advisor {
    /// Create an advisor for the given profile.
    #[must_use]
    pub fn new(profile: PreferenceProfile) -> Self {
        Self { profile }
    }

    /// The profile this advisor scores against.
    #[must_use]
    pub fn profile(&self) -> &PreferenceProfile {
        &self.profile
    }

    /// Filter, score, and rank the collection against the profile.
    #[must_use]
    pub fn recommend(&self, vehicles: &VehicleCollection) -> RecommendOutcome {
        let candidates = CandidateFilter::new(&self.profile).apply(vehicles);

        tracing::debug!(
            candidates = candidates.len(),
            total = vehicles.len(),
            "Applied hard constraints"
        );

        let weights = self.profile.weights();
        let ranked = rank(&candidates, &weights, self.profile.cafv);

        let Some(top_match) = ranked.first().cloned() else {
            return RecommendOutcome::NoMatches(NoMatchReport {
                use_case: self.profile.use_case.label().to_string(),
                budget: self.profile.budget.label().to_string(),
                range_importance: self.profile.range_importance.label().to_string(),
                hint: RelaxationHint::for_profile(&self.profile),
            });
        };

        let reasons = match_reasons(&weights, &top_match);
        let alternatives = diverse_alternatives(&ranked);

        RecommendOutcome::Matches(Box::new(Recommendation {
            top_match,
            reasons,
            alternatives,
            candidates_considered: ranked.len(),
            ranked,
            weights,
        }))
    }
}

/// Build the "why this match" reason lines for a top candidate.
///
/// Each line is gated on its dimension's weight crossing a fixed threshold
/// and on the underlying field being known; a heavily price-weighted
/// profile gets a price reason, and so on.
fn match_reasons(weights: &WeightSet, top: &ScoredCandidate) -> Vec<String> {
    let mut reasons = Vec::new();
    let vehicle = &top.vehicle;

    if weights.price > PRICE_REASON_THRESHOLD {
        if let Some(msrp) = vehicle.base_msrp {
            reasons.push(format!(
                "Great value at {}",
                crate::reports::format_usd(msrp)
            ));
        }
    }

    if weights.range > RANGE_REASON_THRESHOLD {
        if let Some(range) = vehicle.electric_range {
            reasons.push(format!("Excellent range: {} mi", range.round() as i64));
        }
    }

    if weights.value > VALUE_REASON_THRESHOLD {
        if let Some(ratio) = vehicle.miles_per_thousand() {
            reasons.push(format!("Best value: {ratio:.1} mi per $1k"));
        }
    }

    if weights.newness > NEWNESS_REASON_THRESHOLD {
        if let Some(year) = vehicle.model_year {
            reasons.push(format!("Latest technology ({year} model)"));
        }
    }

    if vehicle.is_cafv_eligible() {
        reasons.push("Eligible for clean fuel incentives".to_string());
    }

    reasons
}
