//! User preference profiles and scoring weights.
//!
//! The lookup tables here (minimum-range matrix, budget tiers, use-case
//! weight quadruples, priority rank contributions) are hand-authored
//! constants derived from consumer-research priorities; they are the
//! single source of truth for the scorer.

use crate::model::VehicleType;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// MSRP stand-in for vehicles whose price is unknown.
///
/// Unknown prices survive the budget filter only for tiers whose upper
/// bound reaches the sentinel (Luxury, NoPreference).
pub const MSRP_SENTINEL: f64 = 999_999.0;

/// Primary mission the buyer has in mind.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum UseCase {
    /// Daily commuting (< 50 mi/day)
    Commuting,
    /// Regular road trips (> 200 mi)
    RoadTrips,
    /// Family hauling & errands
    Family,
    /// Weekend fun & performance
    Performance,
    /// General purpose / not sure
    #[default]
    General,
}

impl UseCase {
    /// All use cases, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Commuting,
        Self::RoadTrips,
        Self::Family,
        Self::Performance,
        Self::General,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Commuting => "Daily commuting (< 50 mi/day)",
            Self::RoadTrips => "Regular road trips (> 200 mi)",
            Self::Family => "Family hauling & errands",
            Self::Performance => "Weekend fun & performance",
            Self::General => "General purpose / not sure",
        }
    }

    /// Minimum electric range (miles) required for this use case at the
    /// given importance level.
    #[must_use]
    pub const fn required_range(self, importance: RangeImportance) -> u32 {
        use RangeImportance::{Essential, Important, Moderate, NotCritical};
        match self {
            Self::Commuting => match importance {
                NotCritical => 100,
                Moderate => 150,
                Important => 200,
                Essential => 250,
            },
            Self::RoadTrips => match importance {
                NotCritical => 200,
                Moderate => 250,
                Important => 300,
                Essential => 350,
            },
            Self::Family => match importance {
                NotCritical => 120,
                Moderate => 180,
                Important => 240,
                Essential => 280,
            },
            Self::Performance => match importance {
                NotCritical => 150,
                Moderate => 200,
                Important => 250,
                Essential => 300,
            },
            Self::General => match importance {
                NotCritical => 120,
                Moderate => 180,
                Important => 220,
                Essential => 260,
            },
        }
    }

    /// Scoring weights for this use case. Each quadruple sums to 1.0.
    #[must_use]
    pub const fn weights(self) -> WeightSet {
        match self {
            Self::Commuting => WeightSet {
                price: 0.45,
                range: 0.20,
                value: 0.25,
                newness: 0.10,
            },
            Self::RoadTrips => WeightSet {
                price: 0.25,
                range: 0.50,
                value: 0.15,
                newness: 0.10,
            },
            Self::Family => WeightSet {
                price: 0.35,
                range: 0.30,
                value: 0.25,
                newness: 0.10,
            },
            Self::Performance => WeightSet {
                price: 0.30,
                range: 0.30,
                value: 0.15,
                newness: 0.25,
            },
            Self::General => WeightSet {
                price: 0.35,
                range: 0.30,
                value: 0.25,
                newness: 0.10,
            },
        }
    }
}

/// How much maximum electric range matters to the buyer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RangeImportance {
    /// Not critical (city driving)
    NotCritical,
    /// Moderate (occasional trips)
    #[default]
    Moderate,
    /// Important (regular highway)
    Important,
    /// Essential (frequent road trips)
    Essential,
}

impl RangeImportance {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotCritical => "Not critical (city driving)",
            Self::Moderate => "Moderate (occasional trips)",
            Self::Important => "Important (regular highway)",
            Self::Essential => "Essential (frequent road trips)",
        }
    }
}

/// Budget tier, an inclusive MSRP interval in dollars.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetTier {
    /// Budget-conscious (< $40k)
    Budget,
    /// Mid-range ($40k - $60k)
    MidRange,
    /// Premium ($60k - $80k)
    Premium,
    /// Luxury (> $80k)
    Luxury,
    /// No preference
    #[default]
    NoPreference,
}

impl BudgetTier {
    /// Inclusive (min, max) dollar bounds.
    #[must_use]
    pub const fn bounds(&self) -> (f64, f64) {
        match self {
            Self::Budget => (0.0, 40_000.0),
            Self::MidRange => (40_000.0, 60_000.0),
            Self::Premium => (60_000.0, 80_000.0),
            Self::Luxury => (80_000.0, MSRP_SENTINEL),
            Self::NoPreference => (0.0, MSRP_SENTINEL),
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Budget => "Budget-conscious (< $40k)",
            Self::MidRange => "Mid-range ($40k - $60k)",
            Self::Premium => "Premium ($60k - $80k)",
            Self::Luxury => "Luxury (> $80k)",
            Self::NoPreference => "No preference",
        }
    }

    /// Next wider tier, used when suggesting filter relaxation.
    #[must_use]
    pub const fn widened(&self) -> Self {
        match self {
            Self::Budget => Self::MidRange,
            Self::MidRange => Self::Premium,
            Self::Premium => Self::Luxury,
            Self::Luxury | Self::NoPreference => Self::NoPreference,
        }
    }
}

/// Scoring dimensions a priority label can feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Price,
    Range,
    Value,
    Newness,
}

/// Ranked preference labels a buyer can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityLabel {
    /// Lowest price
    LowestPrice,
    /// Longest range
    LongestRange,
    /// Brand reputation
    BrandReputation,
    /// Latest technology
    LatestTechnology,
    /// Best value (range/price)
    BestValue,
}

impl PriorityLabel {
    /// Scoring dimension this label feeds.
    ///
    /// Brand reputation and latest technology both map onto newness: newer
    /// model years stand in for brand strength and current technology.
    /// A proxy, not a brand-quality model.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        match self {
            Self::LowestPrice => Dimension::Price,
            Self::LongestRange => Dimension::Range,
            Self::BrandReputation | Self::LatestTechnology => Dimension::Newness,
            Self::BestValue => Dimension::Value,
        }
    }
}

/// CAFV eligibility preference.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CafvPreference {
    /// No preference
    #[default]
    DontCare,
    /// Only CAFV-eligible vehicles pass the filter
    Require,
    /// Eligible vehicles get a composite-score bonus
    Prefer,
}

/// Weights applied to the four component scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightSet {
    pub price: f64,
    pub range: f64,
    pub value: f64,
    pub newness: f64,
}

/// Contribution of each priority rank to its dimension.
const RANK_CONTRIBUTIONS: [f64; 3] = [0.50, 0.30, 0.20];

impl WeightSet {
    /// Default weights when no use case or priorities are given.
    pub const DEFAULT: Self = Self {
        price: 0.35,
        range: 0.30,
        value: 0.25,
        newness: 0.10,
    };

    /// Build weights from three ranked priority labels.
    ///
    /// Rank 1 contributes 0.50, rank 2 contributes 0.30, rank 3
    /// contributes 0.20. Labels that map to the same dimension accumulate
    /// additively (brand reputation + latest technology ranked 1st and 2nd
    /// gives newness 0.80 and leaves the rest at zero). Do not renormalize
    /// the accumulation without product sign-off.
    #[must_use]
    pub fn from_priorities(priorities: &[PriorityLabel; 3]) -> Self {
        let mut weights = Self {
            price: 0.0,
            range: 0.0,
            value: 0.0,
            newness: 0.0,
        };
        for (label, contribution) in priorities.iter().zip(RANK_CONTRIBUTIONS) {
            match label.dimension() {
                Dimension::Price => weights.price += contribution,
                Dimension::Range => weights.range += contribution,
                Dimension::Value => weights.value += contribution,
                Dimension::Newness => weights.newness += contribution,
            }
        }
        weights
    }

    /// Sum of all four weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.price + self.range + self.value + self.newness
    }
}

impl Default for WeightSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything the buyer declared about what they want.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    /// Primary mission
    pub use_case: UseCase,
    /// Budget tier (hard constraint)
    pub budget: BudgetTier,
    /// How much range matters
    pub range_importance: RangeImportance,
    /// Optional powertrain constraint
    pub vehicle_type: Option<VehicleType>,
    /// Optional preferred brands (case-insensitive membership)
    pub brands: Vec<String>,
    /// Optional minimum model year
    pub min_year: Option<u16>,
    /// CAFV eligibility preference
    pub cafv: CafvPreference,
    /// Optional ranked priorities; when present they override the
    /// use-case weight table
    pub priorities: Option<[PriorityLabel; 3]>,
}

impl PreferenceProfile {
    /// Scoring weights for this profile: the priority ranking when given,
    /// otherwise the use-case table.
    #[must_use]
    pub fn weights(&self) -> WeightSet {
        match &self.priorities {
            Some(priorities) => WeightSet::from_priorities(priorities),
            None => self.use_case.weights(),
        }
    }

    /// Minimum electric range (miles) this profile demands.
    #[must_use]
    pub fn min_range(&self) -> u32 {
        self.use_case.required_range(self.range_importance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_case_weights_sum_to_one() {
        for use_case in UseCase::ALL {
            let sum = use_case.weights().sum();
            assert!(
                (sum - 1.0).abs() < 1e-9,
                "{use_case:?} weights sum to {sum}, expected 1.0"
            );
        }
    }

    #[test]
    fn test_required_range_table_corners() {
        assert_eq!(
            UseCase::Commuting.required_range(RangeImportance::NotCritical),
            100
        );
        assert_eq!(
            UseCase::RoadTrips.required_range(RangeImportance::Essential),
            350
        );
        assert_eq!(
            UseCase::General.required_range(RangeImportance::Important),
            220
        );
        assert_eq!(
            UseCase::Family.required_range(RangeImportance::Moderate),
            180
        );
    }

    #[test]
    fn test_budget_bounds() {
        assert_eq!(BudgetTier::Budget.bounds(), (0.0, 40_000.0));
        assert_eq!(BudgetTier::MidRange.bounds(), (40_000.0, 60_000.0));
        assert_eq!(BudgetTier::Luxury.bounds(), (80_000.0, MSRP_SENTINEL));
        assert_eq!(BudgetTier::NoPreference.bounds(), (0.0, MSRP_SENTINEL));
    }

    #[test]
    fn test_budget_widened() {
        assert_eq!(BudgetTier::Budget.widened(), BudgetTier::MidRange);
        assert_eq!(BudgetTier::NoPreference.widened(), BudgetTier::NoPreference);
    }

    #[test]
    fn test_priority_weights_basic() {
        let weights = WeightSet::from_priorities(&[
            PriorityLabel::LowestPrice,
            PriorityLabel::LongestRange,
            PriorityLabel::BestValue,
        ]);
        assert!((weights.price - 0.50).abs() < 1e-9);
        assert!((weights.range - 0.30).abs() < 1e-9);
        assert!((weights.value - 0.20).abs() < 1e-9);
        assert!((weights.newness - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_priority_weights_accumulate_on_shared_dimension() {
        // Brand reputation and latest technology both feed newness; their
        // contributions stack rather than renormalize.
        let weights = WeightSet::from_priorities(&[
            PriorityLabel::BrandReputation,
            PriorityLabel::LatestTechnology,
            PriorityLabel::LowestPrice,
        ]);
        assert!((weights.newness - 0.80).abs() < 1e-9);
        assert!((weights.price - 0.20).abs() < 1e-9);
        assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_profile_weight_selection() {
        let mut profile = PreferenceProfile {
            use_case: UseCase::RoadTrips,
            ..Default::default()
        };
        assert_eq!(profile.weights(), UseCase::RoadTrips.weights());

        profile.priorities = Some([
            PriorityLabel::BestValue,
            PriorityLabel::LowestPrice,
            PriorityLabel::LongestRange,
        ]);
        let weights = profile.weights();
        assert!((weights.value - 0.50).abs() < 1e-9);
        assert!((weights.price - 0.30).abs() < 1e-9);
        assert!((weights.range - 0.20).abs() < 1e-9);
    }

    #[test]
    fn test_profile_min_range() {
        let profile = PreferenceProfile {
            use_case: UseCase::RoadTrips,
            range_importance: RangeImportance::Important,
            ..Default::default()
        };
        assert_eq!(profile.min_range(), 300);
    }

    #[test]
    fn test_default_weights_match_general() {
        assert_eq!(WeightSet::DEFAULT, UseCase::General.weights());
    }
}
