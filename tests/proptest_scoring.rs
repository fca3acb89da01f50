//! Property-based tests for the scoring engine.
//!
//! Ensures the scorer handles arbitrary candidate sets without panicking
//! and that its core laws (score bounds, degenerate neutrality,
//! determinism, price monotonicity, brand diversity) hold across random
//! inputs.

use ev_advisor::advisor::{
    diverse_alternatives, rank, CafvPreference, PriorityLabel, UseCase, WeightSet, CAFV_BONUS,
    NEUTRAL_SCORE,
};
use ev_advisor::model::{VehicleRecord, VehicleType};
use proptest::prelude::*;

fn arb_vehicle() -> impl Strategy<Value = VehicleRecord> {
    (
        prop::sample::select(vec!["TESLA", "NISSAN", "CHEVROLET", "KIA", "HYUNDAI", "FORD"]),
        prop::option::of(0.0..500.0_f64),
        prop::option::of(0.0..200_000.0_f64),
        prop::option::of(2010..2026_u16),
        prop::bool::ANY,
    )
        .prop_map(|(make, range, msrp, year, eligible)| {
            let mut v = VehicleRecord::new(make, "Model", VehicleType::BatteryElectric);
            v.electric_range = range;
            v.base_msrp = msrp;
            v.model_year = year;
            if eligible {
                v.cafv_eligibility =
                    Some("Clean Alternative Fuel Vehicle Eligible".to_string());
            }
            v
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn component_scores_stay_in_unit_interval(
        vehicles in prop::collection::vec(arb_vehicle(), 0..40),
    ) {
        let ranked = rank(&vehicles, &WeightSet::DEFAULT, CafvPreference::Prefer);
        for candidate in &ranked {
            let s = &candidate.scores;
            for score in [s.price, s.range, s.value, s.newness] {
                prop_assert!((0.0..=1.0).contains(&score), "score {score} out of range");
            }
            prop_assert!(s.cafv_bonus == 0.0 || s.cafv_bonus == CAFV_BONUS);
            prop_assert!(candidate.composite >= 0.0);
            prop_assert!(
                candidate.composite <= WeightSet::DEFAULT.sum() + CAFV_BONUS + 1e-9
            );
        }
    }

    #[test]
    fn ranking_is_deterministic(
        vehicles in prop::collection::vec(arb_vehicle(), 0..40),
    ) {
        let first = rank(&vehicles, &WeightSet::DEFAULT, CafvPreference::DontCare);
        let second = rank(&vehicles, &WeightSet::DEFAULT, CafvPreference::DontCare);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ranking_is_descending(
        vehicles in prop::collection::vec(arb_vehicle(), 0..40),
    ) {
        let ranked = rank(&vehicles, &WeightSet::DEFAULT, CafvPreference::DontCare);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].composite >= pair[1].composite);
        }
    }

    #[test]
    fn constant_msrp_scores_neutral(
        vehicles in prop::collection::vec(arb_vehicle(), 1..20),
        msrp in 1_000.0..100_000.0_f64,
    ) {
        // Force a single distinct price across the whole set.
        let vehicles: Vec<VehicleRecord> = vehicles
            .into_iter()
            .map(|mut v| {
                v.base_msrp = Some(msrp);
                v
            })
            .collect();

        let ranked = rank(&vehicles, &WeightSet::DEFAULT, CafvPreference::DontCare);
        for candidate in &ranked {
            prop_assert_eq!(candidate.scores.price, NEUTRAL_SCORE);
        }
    }

    #[test]
    fn entirely_missing_field_scores_neutral(
        vehicles in prop::collection::vec(arb_vehicle(), 1..20),
    ) {
        let vehicles: Vec<VehicleRecord> = vehicles
            .into_iter()
            .map(|mut v| {
                v.base_msrp = None;
                v
            })
            .collect();

        let ranked = rank(&vehicles, &WeightSet::DEFAULT, CafvPreference::DontCare);
        for candidate in &ranked {
            prop_assert_eq!(candidate.scores.price, NEUTRAL_SCORE);
            prop_assert_eq!(candidate.scores.value, NEUTRAL_SCORE);
        }
    }

    #[test]
    fn price_score_strictly_decreasing_in_msrp(
        prices in prop::collection::btree_set(1_000u32..150_000, 2..15),
    ) {
        // Identical vehicles except for price; the price score must be
        // strictly monotonic against MSRP.
        let vehicles: Vec<VehicleRecord> = prices
            .iter()
            .map(|&p| {
                let mut v = VehicleRecord::new("TESLA", "Model", VehicleType::BatteryElectric);
                v.base_msrp = Some(f64::from(p));
                v.electric_range = Some(250.0);
                v
            })
            .collect();

        let ranked = rank(&vehicles, &WeightSet::DEFAULT, CafvPreference::DontCare);

        let mut by_price: Vec<(f64, f64)> = ranked
            .iter()
            .map(|c| (c.vehicle.base_msrp.unwrap_or_default(), c.scores.price))
            .collect();
        by_price.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        for pair in by_price.windows(2) {
            prop_assert!(
                pair[0].1 > pair[1].1,
                "price score must strictly decrease: {:?} vs {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn alternatives_never_repeat_brands(
        vehicles in prop::collection::vec(arb_vehicle(), 0..40),
    ) {
        let ranked = rank(&vehicles, &WeightSet::DEFAULT, CafvPreference::DontCare);
        let alternatives = diverse_alternatives(&ranked);

        prop_assert!(alternatives.len() <= 3);

        let mut makes: Vec<String> = alternatives
            .iter()
            .map(|a| a.candidate.vehicle.make.to_lowercase())
            .collect();
        if let Some(top) = ranked.first() {
            prop_assert!(!makes.contains(&top.vehicle.make.to_lowercase()));
        }
        let total = makes.len();
        makes.sort();
        makes.dedup();
        prop_assert_eq!(makes.len(), total);
    }

    #[test]
    fn priority_weights_always_sum_to_one(
        p1 in arb_priority(),
        p2 in arb_priority(),
        p3 in arb_priority(),
    ) {
        let weights = WeightSet::from_priorities(&[p1, p2, p3]);
        prop_assert!((weights.sum() - 1.0).abs() < 1e-9);
        for w in [weights.price, weights.range, weights.value, weights.newness] {
            prop_assert!((0.0..=1.0).contains(&w));
        }
    }
}

fn arb_priority() -> impl Strategy<Value = PriorityLabel> {
    prop::sample::select(vec![
        PriorityLabel::LowestPrice,
        PriorityLabel::LongestRange,
        PriorityLabel::BrandReputation,
        PriorityLabel::LatestTechnology,
        PriorityLabel::BestValue,
    ])
}

/// The use-case weight table is a fixed artifact; every quadruple must
/// sum to 1.0.
#[test]
fn use_case_weight_table_sums_to_one() {
    for use_case in UseCase::ALL {
        let sum = use_case.weights().sum();
        assert!(
            (sum - 1.0).abs() < 1e-9,
            "{use_case:?} weights sum to {sum}, expected 1.0"
        );
    }
}
