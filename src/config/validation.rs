//! Configuration validation.

use super::types::{QueryConfig, RecommendConfig, StatsConfig};
use crate::error::{AdvisorError, Result};

/// Earliest model year the dataset plausibly contains.
const MIN_PLAUSIBLE_YEAR: u16 = 1990;

/// Configs that can sanity-check themselves before a command runs.
pub trait Validatable {
    /// Validate the configuration, returning a config error describing the
    /// first problem found.
    fn validate(&self) -> Result<()>;
}

impl Validatable for RecommendConfig {
    fn validate(&self) -> Result<()> {
        if self.top == 0 {
            return Err(AdvisorError::config("--top must be at least 1"));
        }
        if let Some(year) = self.profile.min_year {
            if year < MIN_PLAUSIBLE_YEAR {
                return Err(AdvisorError::config(format!(
                    "--min-year {year} is earlier than any plausible model year"
                )));
            }
        }
        Ok(())
    }
}

impl Validatable for QueryConfig {
    fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(AdvisorError::config("--limit must be at least 1"));
        }
        Ok(())
    }
}

impl Validatable for StatsConfig {
    fn validate(&self) -> Result<()> {
        if self.top == 0 {
            return Err(AdvisorError::config("--top must be at least 1"));
        }
        if self.min_year < MIN_PLAUSIBLE_YEAR {
            return Err(AdvisorError::config(format!(
                "--min-year {} is earlier than any plausible model year",
                self.min_year
            )));
        }
        Ok(())
    }
}
