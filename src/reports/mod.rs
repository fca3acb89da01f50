//! Report output formats and shared formatting helpers.
//!
//! Each CLI command renders its own payload (recommendation, query result,
//! dataset summary) into one of the formats defined here. The helpers keep
//! money, truncation, and CSV escaping consistent across commands.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Auto-detect: summary if stdout is a terminal, JSON otherwise
    #[default]
    Auto,
    /// Brief human-readable summary
    Summary,
    /// Aligned tabular terminal output
    Table,
    /// Structured JSON output
    Json,
    /// Human-readable Markdown
    Markdown,
    /// CSV for spreadsheet import
    Csv,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Auto => write!(f, "auto"),
            ReportFormat::Summary => write!(f, "summary"),
            ReportFormat::Table => write!(f, "table"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Metadata included in structured reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Dataset file path
    pub dataset_path: Option<String>,
    /// Tool version
    pub tool_version: String,
    /// Generation timestamp (RFC 3339)
    pub generated_at: String,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(dataset_path: Option<String>) -> Self {
        Self {
            dataset_path,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Format a dollar amount with thousands separators: `$42,990`.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Render an optional dollar amount, `N/A` when unknown.
#[must_use]
pub fn format_usd_opt(amount: Option<f64>) -> String {
    amount.map_or_else(|| "N/A".to_string(), format_usd)
}

/// Render an optional mile count, `N/A` when unknown.
#[must_use]
pub fn format_miles_opt(miles: Option<f64>) -> String {
    miles.map_or_else(|| "N/A".to_string(), |m| format!("{} mi", m.round() as i64))
}

/// Render an optional model year, `N/A` when unknown.
#[must_use]
pub fn format_year_opt(year: Option<u16>) -> String {
    year.map_or_else(|| "N/A".to_string(), |y| y.to_string())
}

/// Truncate a string to the given width, appending `...` when cut.
#[must_use]
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{cut}...")
    } else {
        s.chars().take(max).collect()
    }
}

/// Escape a CSV field value (quote if it contains a comma, quote, or
/// newline).
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
