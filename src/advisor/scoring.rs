//! Score normalization and composite ranking.
//!
//! Each scoring dimension is min-max normalized over the candidate set.
//! A dimension with fewer than two distinct known values, or a candidate
//! whose own value is unknown, scores a neutral 0.5, which keeps a
//! degenerate set from rewarding or punishing anyone.

use super::profile::{CafvPreference, WeightSet};
use crate::model::VehicleRecord;
use serde::{Deserialize, Serialize};

/// Neutral score assigned when a dimension cannot discriminate.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Flat composite bonus for CAFV-eligible vehicles when the buyer prefers
/// eligibility.
pub const CAFV_BONUS: f64 = 0.1;

/// Min-max normalizer fitted over one dimension of a candidate set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreNormalizer {
    /// (min, max) when the fitted values have at least two distinct points
    span: Option<(f64, f64)>,
}

impl ScoreNormalizer {
    /// Fit the normalizer over the known values of a dimension.
    #[must_use]
    pub fn fit<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut seen = false;

        for value in values.into_iter().flatten() {
            if !value.is_finite() {
                continue;
            }
            seen = true;
            min = min.min(value);
            max = max.max(value);
        }

        let span = if seen && max > min {
            Some((min, max))
        } else {
            None
        };
        Self { span }
    }

    /// Whether the fitted dimension cannot discriminate (missing or
    /// constant), in which case every candidate scores [`NEUTRAL_SCORE`].
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.span.is_none()
    }

    /// Normalize one value into [0, 1]; unknown values and degenerate
    /// dimensions score [`NEUTRAL_SCORE`].
    #[must_use]
    pub fn score(&self, value: Option<f64>) -> f64 {
        match (self.span, value) {
            (Some((min, max)), Some(v)) => ((v - min) / (max - min)).clamp(0.0, 1.0),
            _ => NEUTRAL_SCORE,
        }
    }
}

/// Normalized component scores for one candidate, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    /// Affordability: 1 - normalized MSRP (lower price scores higher)
    pub price: f64,
    /// Normalized electric range
    pub range: f64,
    /// Normalized range-per-dollar ratio
    pub value: f64,
    /// Normalized model year
    pub newness: f64,
    /// CAFV composite bonus, 0.0 or [`CAFV_BONUS`]
    pub cafv_bonus: f64,
}

/// A candidate vehicle with its component scores and composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub vehicle: VehicleRecord,
    pub scores: ComponentScores,
    /// Weighted sum of the component scores plus the CAFV bonus; may
    /// exceed 1.0 when the bonus applies
    pub composite: f64,
}

impl ScoredCandidate {
    /// Composite score as a whole percentage for display.
    #[must_use]
    pub fn score_percent(&self) -> i64 {
        (self.composite * 100.0).round() as i64
    }
}

/// Score and rank a candidate set.
///
/// The returned ranking is a pure function of the inputs: the sort is
/// stable and descending by composite score, so candidates with equal
/// scores keep their load order.
#[must_use]
pub fn rank(
    candidates: &[VehicleRecord],
    weights: &WeightSet,
    cafv: CafvPreference,
) -> Vec<ScoredCandidate> {
    let range_norm = ScoreNormalizer::fit(candidates.iter().map(|v| v.electric_range));
    let price_norm = ScoreNormalizer::fit(candidates.iter().map(|v| v.base_msrp));
    let year_norm =
        ScoreNormalizer::fit(candidates.iter().map(|v| v.model_year.map(f64::from)));
    let value_norm = ScoreNormalizer::fit(candidates.iter().map(VehicleRecord::value_ratio));

    let mut ranked: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|vehicle| {
            let scores = ComponentScores {
                price: 1.0 - price_norm.score(vehicle.base_msrp),
                range: range_norm.score(vehicle.electric_range),
                value: value_norm.score(vehicle.value_ratio()),
                newness: year_norm.score(vehicle.model_year.map(f64::from)),
                cafv_bonus: cafv_bonus(vehicle, cafv),
            };
            let composite = weights.price * scores.price
                + weights.range * scores.range
                + weights.value * scores.value
                + weights.newness * scores.newness
                + scores.cafv_bonus;
            ScoredCandidate {
                vehicle: vehicle.clone(),
                scores,
                composite,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.composite
            .partial_cmp(&a.composite)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
}

fn cafv_bonus(vehicle: &VehicleRecord, cafv: CafvPreference) -> f64 {
    if cafv == CafvPreference::Prefer && vehicle.is_cafv_eligible() {
        CAFV_BONUS
    } else {
        0.0
    }
}
