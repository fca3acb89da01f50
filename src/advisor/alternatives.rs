//! Brand-diverse alternative selection.
//!
//! After the top match is chosen, up to three alternatives from other
//! brands are surfaced, each foregrounding a different strength. Selection
//! is greedy with no backtracking: every winner removes its brand from the
//! pools of the later slots, and a slot with an empty pool is omitted.

use super::scoring::ScoredCandidate;
use crate::reports::format_usd;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fixed alternative slots, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlternativeKind {
    MostAffordable,
    LongestRange,
    BestValue,
}

impl AlternativeKind {
    /// Display label for this slot.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MostAffordable => "Most Affordable",
            Self::LongestRange => "Longest Range",
            Self::BestValue => "Best Value",
        }
    }
}

/// One alternative recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub kind: AlternativeKind,
    pub candidate: ScoredCandidate,
    /// One-line strength description
    pub highlight: String,
}

/// Pick up to three brand-diverse alternatives from a ranking.
///
/// The first ranked candidate is the top match; its brand seeds the
/// exclusion set. Ties within a slot resolve to the higher-ranked
/// candidate.
#[must_use]
pub fn diverse_alternatives(ranked: &[ScoredCandidate]) -> Vec<Alternative> {
    let Some(top) = ranked.first() else {
        return Vec::new();
    };

    let mut used_makes: HashSet<String> = HashSet::new();
    used_makes.insert(top.vehicle.make.to_lowercase());

    let mut alternatives = Vec::new();

    if let Some(pick) = first_min_by(
        remaining(ranked, &used_makes),
        |c| c.vehicle.base_msrp,
    ) {
        let price = pick.vehicle.base_msrp.unwrap_or_default();
        alternatives.push(Alternative {
            kind: AlternativeKind::MostAffordable,
            highlight: format!("Best price alternative: {}", format_usd(price)),
            candidate: pick.clone(),
        });
        used_makes.insert(pick.vehicle.make.to_lowercase());
    }

    if let Some(pick) = first_max_by(
        remaining(ranked, &used_makes),
        |c| c.vehicle.electric_range,
    ) {
        let range = pick.vehicle.electric_range.unwrap_or_default();
        alternatives.push(Alternative {
            kind: AlternativeKind::LongestRange,
            highlight: format!("Maximum range: {} miles", range.round() as i64),
            candidate: pick.clone(),
        });
        used_makes.insert(pick.vehicle.make.to_lowercase());
    }

    if let Some(pick) = first_max_by(remaining(ranked, &used_makes), |c| Some(c.scores.value)) {
        let highlight = match pick.vehicle.miles_per_thousand() {
            Some(ratio) => format!("{ratio:.1} mi per $1k spent"),
            None => "Best range for the money".to_string(),
        };
        alternatives.push(Alternative {
            kind: AlternativeKind::BestValue,
            highlight,
            candidate: pick.clone(),
        });
    }

    alternatives
}

/// Candidates whose brand has not been used yet.
fn remaining<'a>(
    ranked: &'a [ScoredCandidate],
    used_makes: &'a HashSet<String>,
) -> impl Iterator<Item = &'a ScoredCandidate> {
    ranked
        .iter()
        .filter(move |c| !used_makes.contains(&c.vehicle.make.to_lowercase()))
}

/// First candidate (in ranking order) with the strictly smallest key;
/// candidates with an unknown key are skipped.
fn first_min_by<'a, I, F>(items: I, key: F) -> Option<&'a ScoredCandidate>
where
    I: Iterator<Item = &'a ScoredCandidate>,
    F: Fn(&ScoredCandidate) -> Option<f64>,
{
    let mut best: Option<(&ScoredCandidate, f64)> = None;
    for item in items {
        let Some(k) = key(item) else { continue };
        if best.map_or(true, |(_, bk)| k < bk) {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}

/// First candidate (in ranking order) with the strictly largest key;
/// candidates with an unknown key are skipped.
fn first_max_by<'a, I, F>(items: I, key: F) -> Option<&'a ScoredCandidate>
where
    I: Iterator<Item = &'a ScoredCandidate>,
    F: Fn(&ScoredCandidate) -> Option<f64>,
{
    let mut best: Option<(&ScoredCandidate, f64)> = None;
    for item in items {
        let Some(k) = key(item) else { continue };
        if best.map_or(true, |(_, bk)| k > bk) {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::profile::{CafvPreference, WeightSet};
    use crate::advisor::scoring::{rank, ComponentScores};
    use crate::model::{VehicleRecord, VehicleType};

    fn vehicle(make: &str, range: Option<f64>, msrp: Option<f64>) -> VehicleRecord {
        let mut v = VehicleRecord::new(make, "Test", VehicleType::BatteryElectric);
        v.electric_range = range;
        v.base_msrp = msrp;
        v
    }

    /// Hand-built ranking entry; `composite` fixes the rank order directly.
    fn scored(
        make: &str,
        range: Option<f64>,
        msrp: Option<f64>,
        value_score: f64,
        composite: f64,
    ) -> ScoredCandidate {
        ScoredCandidate {
            vehicle: vehicle(make, range, msrp),
            scores: ComponentScores {
                price: 0.5,
                range: 0.5,
                value: value_score,
                newness: 0.5,
                cafv_bonus: 0.0,
            },
            composite,
        }
    }

    #[test]
    fn test_slot_order_and_picks() {
        let ranked = vec![
            scored("Tesla", Some(330.0), Some(55_000.0), 0.2, 0.9),
            scored("Hyundai", Some(305.0), Some(45_000.0), 0.5, 0.8),
            scored("Chevrolet", Some(259.0), Some(31_000.0), 1.0, 0.7),
            scored("Nissan", Some(150.0), Some(28_000.0), 0.0, 0.6),
        ];
        let alternatives = diverse_alternatives(&ranked);

        assert_eq!(alternatives.len(), 3);
        assert_eq!(alternatives[0].kind, AlternativeKind::MostAffordable);
        assert_eq!(alternatives[0].candidate.vehicle.make, "Nissan");
        assert_eq!(alternatives[1].kind, AlternativeKind::LongestRange);
        assert_eq!(alternatives[1].candidate.vehicle.make, "Hyundai");
        assert_eq!(alternatives[2].kind, AlternativeKind::BestValue);
        assert_eq!(alternatives[2].candidate.vehicle.make, "Chevrolet");
    }

    #[test]
    fn test_no_brand_repeats_through_ranker() {
        let records = vec![
            vehicle("Tesla", Some(330.0), Some(55_000.0)),
            vehicle("Nissan", Some(150.0), Some(28_000.0)),
            vehicle("Hyundai", Some(300.0), Some(45_000.0)),
            vehicle("Chevrolet", Some(250.0), Some(32_000.0)),
            vehicle("Nissan", Some(220.0), Some(36_000.0)),
        ];
        let ranked = rank(&records, &WeightSet::DEFAULT, CafvPreference::DontCare);
        let alternatives = diverse_alternatives(&ranked);

        let top_make = ranked[0].vehicle.make.to_lowercase();
        let mut makes: Vec<String> = alternatives
            .iter()
            .map(|a| a.candidate.vehicle.make.to_lowercase())
            .collect();
        assert!(!makes.contains(&top_make));
        let before = makes.len();
        makes.sort();
        makes.dedup();
        assert_eq!(makes.len(), before, "brands must not repeat across slots");
    }

    #[test]
    fn test_single_brand_yields_no_alternatives() {
        let ranked = vec![
            scored("Tesla", Some(330.0), Some(55_000.0), 0.5, 0.9),
            scored("Tesla", Some(272.0), Some(43_000.0), 0.5, 0.8),
        ];
        assert!(diverse_alternatives(&ranked).is_empty());
    }

    #[test]
    fn test_empty_ranking() {
        assert!(diverse_alternatives(&[]).is_empty());
    }

    #[test]
    fn test_unknown_price_skips_affordable_slot() {
        let ranked = vec![
            scored("Tesla", Some(330.0), Some(55_000.0), 0.5, 0.9),
            scored("Rivian", Some(310.0), None, 0.5, 0.8),
        ];
        let alternatives = diverse_alternatives(&ranked);

        // Rivian has no price, so the affordability slot is omitted; it
        // wins the range slot instead, leaving the value pool empty.
        assert_eq!(alternatives.len(), 1);
        assert_eq!(alternatives[0].kind, AlternativeKind::LongestRange);
        assert_eq!(alternatives[0].candidate.vehicle.make, "Rivian");
    }

    #[test]
    fn test_longest_range_is_true_maximum() {
        let ranked = vec![
            scored("Tesla", Some(200.0), Some(55_000.0), 0.2, 0.9),
            scored("Nissan", Some(150.0), Some(28_000.0), 0.4, 0.8),
            scored("Lucid", Some(520.0), Some(90_000.0), 0.1, 0.3),
        ];
        let alternatives = diverse_alternatives(&ranked);

        let range_slot = alternatives
            .iter()
            .find(|a| a.kind == AlternativeKind::LongestRange)
            .expect("range slot");
        assert_eq!(range_slot.candidate.vehicle.make, "Lucid");
        assert!(range_slot.highlight.contains("520 miles"));
    }

    #[test]
    fn test_tie_resolves_to_higher_rank() {
        let ranked = vec![
            scored("Tesla", Some(330.0), Some(55_000.0), 0.2, 0.9),
            scored("Kia", Some(250.0), Some(30_000.0), 0.8, 0.8),
            scored("Fiat", Some(120.0), Some(30_000.0), 0.1, 0.7),
        ];
        let alternatives = diverse_alternatives(&ranked);

        // Kia and Fiat tie on price; Kia ranks higher so it takes the slot.
        assert_eq!(alternatives[0].kind, AlternativeKind::MostAffordable);
        assert_eq!(alternatives[0].candidate.vehicle.make, "Kia");
    }

    #[test]
    fn test_value_highlight_without_price() {
        // Rivian has neither price nor range, so it skips the first two
        // slots and lands in the value slot, where the score is always known.
        let ranked = vec![
            scored("Tesla", Some(330.0), Some(55_000.0), 0.2, 0.9),
            scored("Rivian", None, None, 0.8, 0.8),
        ];
        let alternatives = diverse_alternatives(&ranked);

        let value_slot = alternatives
            .iter()
            .find(|a| a.kind == AlternativeKind::BestValue)
            .expect("value slot");
        assert_eq!(value_slot.highlight, "Best range for the money");
    }
}
