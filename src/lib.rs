//! **Multi-criteria EV recommendation over public registration data.**
//!
//! `ev-advisor` loads an electric-vehicle registration dataset (CSV),
//! filters it against a buyer's declared preferences, and ranks the
//! survivors with a research-based multi-criteria score. It powers both a
//! command-line tool and a Rust library for programmatic use.
//!
//! ## How a recommendation is made
//!
//! 1. **Hard constraints first** ([`advisor::CandidateFilter`]): budget
//!    tier, a minimum-range floor derived from the use case and the
//!    buyer's range anxiety, and optional type/brand/year/CAFV
//!    refinements. These are deal-breakers, not preferences.
//! 2. **Score what survives** ([`advisor::rank`]): each candidate gets
//!    four min-max-normalized component scores (price, range,
//!    range-per-dollar value, model-year newness) combined by a weight
//!    profile: either a fixed per-use-case table or the buyer's own
//!    ranked priorities.
//! 3. **Diversify the answer** ([`advisor::diverse_alternatives`]): up to
//!    three alternatives from other brands, each foregrounding a
//!    different strength (affordability, range, value).
//!
//! An empty candidate set is a valid outcome, reported with a concrete
//! relaxation suggestion rather than an error.
//!
//! ## Getting started
//!
//! ```no_run
//! use std::path::Path;
//! use ev_advisor::advisor::{Advisor, PreferenceProfile, RecommendOutcome};
//! use ev_advisor::dataset::load_dataset;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let vehicles = load_dataset(Path::new("Electric_Vehicle_Population_Data.csv"))?;
//!     let advisor = Advisor::new(PreferenceProfile::default());
//!
//!     match advisor.recommend(&vehicles) {
//!         RecommendOutcome::Matches(rec) => {
//!             println!(
//!                 "Best match: {} (score {}%)",
//!                 rec.top_match.vehicle.display_name(),
//!                 rec.top_match.score_percent()
//!             );
//!         }
//!         RecommendOutcome::NoMatches(report) => println!("{}", report.message()),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`model`]: the normalized [`VehicleRecord`]/[`VehicleCollection`]
//!   data model every other module consumes.
//! - [`dataset`]: CSV ingestion with graceful per-cell degradation, plus
//!   deterministic dataset statistics.
//! - [`advisor`]: the recommendation engine: profiles, filtering,
//!   scoring, ranking, and alternative selection.
//! - [`reports`] and [`output`]: output formats and stdout/file plumbing
//!   shared by the CLI commands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Cast safety: usize/u16/i64/f64 casts are pervasive in the scoring and
    // aggregation math; all values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

pub mod advisor;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod output;
pub mod reports;

// Re-export main types for convenience
pub use advisor::{
    Advisor, Alternative, AlternativeKind, BudgetTier, CafvPreference, CandidateFilter,
    NoMatchReport, PreferenceProfile, PriorityLabel, RangeImportance, RecommendOutcome,
    Recommendation, RelaxationHint, ScoredCandidate, UseCase, WeightSet,
};
pub use config::{OutputConfig, QueryConfig, RecommendConfig, StatsConfig, Validatable};
pub use dataset::{load_dataset, parse_dataset_str, summarize, DatasetSummary, StatsOptions};
pub use error::{AdvisorError, ErrorContext, Result};
pub use model::{VehicleCollection, VehicleRecord, VehicleType};
pub use reports::ReportFormat;
