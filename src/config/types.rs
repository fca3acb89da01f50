//! Per-command configuration structs.

use crate::advisor::PreferenceProfile;
use crate::reports::ReportFormat;
use std::path::PathBuf;

/// Output destination and rendering options shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Requested output format (may be `Auto`)
    pub format: ReportFormat,
    /// Output file path (stdout if not specified)
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

/// Configuration for the `recommend` command.
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// Path to the registration dataset CSV
    pub dataset: PathBuf,
    /// Buyer preference profile
    pub profile: PreferenceProfile,
    /// Number of ranked candidates shown in the comparison table
    pub top: usize,
    /// Output options
    pub output: OutputConfig,
}

/// Configuration for the `query` command.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Path to the registration dataset CSV
    pub dataset: PathBuf,
    /// Maximum number of results
    pub limit: usize,
    /// Output options
    pub output: OutputConfig,
}

/// Configuration for the `stats` command.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Path to the registration dataset CSV
    pub dataset: PathBuf,
    /// Minimum model year included in yearly series
    pub min_year: u16,
    /// Entries kept in top-makes and catalog listings
    pub top: usize,
    /// Output options
    pub output: OutputConfig,
}
