//! Direct-search command handler.
//!
//! Searches the dataset by free-text pattern and field filters, for buyers
//! who already know what they want. All active filters are AND-combined.

use super::cafv_short;
use crate::config::{QueryConfig, Validatable};
use crate::dataset::load_dataset;
use crate::model::{VehicleRecord, VehicleType};
use crate::output::{auto_detect_format, exit_codes, write_output, OutputTarget};
use crate::reports::{
    csv_escape, format_miles_opt, format_usd_opt, format_year_opt, truncate, ReportFormat,
    ReportMetadata,
};
use anyhow::{bail, Result};
use serde::Serialize;
use std::cmp::Ordering;

/// Filter criteria for searching the dataset.
///
/// A vehicle must match every non-None filter to be included.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    /// Free-text pattern matched (case-insensitive) against make, model,
    /// vehicle type label, and CAFV text
    pub pattern: Option<String>,
    /// Make substring filter
    pub make: Option<String>,
    /// Model substring filter
    pub model: Option<String>,
    /// Minimum electric range in miles (unknown range counts as zero)
    pub min_range: Option<f64>,
    /// Minimum model year (unknown year fails)
    pub min_year: Option<u16>,
    /// Powertrain constraint
    pub vehicle_type: Option<VehicleType>,
}

impl QueryFilter {
    /// Check if a vehicle matches all active filters.
    #[must_use]
    pub fn matches(&self, vehicle: &VehicleRecord) -> bool {
        if let Some(ref pattern) = self.pattern {
            let needle = pattern.to_lowercase();
            let mut haystacks = vec![
                vehicle.make.to_lowercase(),
                vehicle.model.to_lowercase(),
                vehicle.vehicle_type.label().to_lowercase(),
            ];
            if let Some(cafv) = &vehicle.cafv_eligibility {
                haystacks.push(cafv.to_lowercase());
            }
            if !haystacks.iter().any(|h| h.contains(&needle)) {
                return false;
            }
        }

        if let Some(ref make) = self.make {
            if !vehicle.make.to_lowercase().contains(&make.to_lowercase()) {
                return false;
            }
        }

        if let Some(ref model) = self.model {
            if !vehicle.model.to_lowercase().contains(&model.to_lowercase()) {
                return false;
            }
        }

        if let Some(min_range) = self.min_range {
            if vehicle.electric_range.unwrap_or(0.0) < min_range {
                return false;
            }
        }

        if let Some(min_year) = self.min_year {
            if !vehicle.model_year.is_some_and(|y| y >= min_year) {
                return false;
            }
        }

        if let Some(ref wanted) = self.vehicle_type {
            if &vehicle.vehicle_type != wanted {
                return false;
            }
        }

        true
    }

    /// Returns true if no filters are set (would match everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
            && self.make.is_none()
            && self.model.is_none()
            && self.min_range.is_none()
            && self.min_year.is_none()
            && self.vehicle_type.is_none()
    }

    /// Build a human-readable description of the active filters.
    fn description(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref p) = self.pattern {
            parts.push(format!("\"{p}\""));
        }
        if let Some(ref m) = self.make {
            parts.push(format!("make=\"{m}\""));
        }
        if let Some(ref m) = self.model {
            parts.push(format!("model=\"{m}\""));
        }
        if let Some(r) = self.min_range {
            parts.push(format!("min-range={}", r.round() as i64));
        }
        if let Some(y) = self.min_year {
            parts.push(format!("min-year={y}"));
        }
        if let Some(ref t) = self.vehicle_type {
            parts.push(format!("type={}", t.short_label()));
        }
        if parts.is_empty() {
            "*".to_string()
        } else {
            parts.join(" AND ")
        }
    }
}

/// Full query result.
#[derive(Debug, Clone, Serialize)]
struct QueryReport {
    filter: String,
    total_vehicles: usize,
    match_count: usize,
    /// Matches after sorting and the result cap
    matches: Vec<VehicleRecord>,
}

/// Run the query command, returning the desired exit code.
pub fn run_query(config: QueryConfig, filter: QueryFilter) -> Result<i32> {
    config.validate()?;

    if filter.is_empty() {
        bail!(
            "No query filters specified. Provide a search pattern or use \
             --make, --model, --min-range, --min-year, or --ev-type"
        );
    }

    let vehicles = load_dataset(&config.dataset)?;
    let total_vehicles = vehicles.len();

    let mut matches: Vec<VehicleRecord> = vehicles
        .iter()
        .filter(|v| filter.matches(v))
        .cloned()
        .collect();
    let match_count = matches.len();

    sort_matches(&mut matches);
    matches.truncate(config.limit);

    let report = QueryReport {
        filter: filter.description(),
        total_vehicles,
        match_count,
        matches,
    };

    let target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &target);

    let rendered = match format {
        ReportFormat::Json => format_json(&report, &config)?,
        ReportFormat::Csv => format_csv(&report),
        ReportFormat::Markdown => format_markdown(&report),
        ReportFormat::Auto | ReportFormat::Summary | ReportFormat::Table => format_table(&report),
    };

    write_output(&rendered, &target, config.output.quiet)?;

    if report.match_count == 0 {
        return Ok(exit_codes::NO_MATCHES);
    }
    Ok(exit_codes::SUCCESS)
}

/// Sort: range descending, then price ascending, unknowns last in both;
/// the stable sort keeps load order for full ties.
fn sort_matches(matches: &mut [VehicleRecord]) {
    matches.sort_by(|a, b| {
        let range_ord = match (a.electric_range, b.electric_range) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        range_ord.then_with(|| match (a.base_msrp, b.base_msrp) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
    });
}

fn format_json(report: &QueryReport, config: &QueryConfig) -> Result<String> {
    let payload = serde_json::json!({
        "tool": "ev-advisor",
        "metadata": ReportMetadata::new(Some(config.dataset.display().to_string())),
        "query": report,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Aligned text table with a top-match headline.
fn format_table(report: &QueryReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Query: {} ({} of {} vehicles matched)\n\n",
        report.filter, report.match_count, report.total_vehicles
    ));

    if report.matches.is_empty() {
        out.push_str("No matches found. Try broadening your search.\n");
        return out;
    }

    if let Some(top) = report.matches.first() {
        out.push_str(&format!(
            "Top match: {} ({}, {}, {})\n\n",
            top.display_name(),
            format_miles_opt(top.electric_range),
            format_usd_opt(top.base_msrp),
            format_year_opt(top.model_year),
        ));
    }

    let make_w = column_width(report.matches.iter().map(|v| v.make.len()), 4, 20);
    let model_w = column_width(report.matches.iter().map(|v| v.model.len()), 5, 24);

    out.push_str(&format!(
        "{:<make_w$}  {:<model_w$}  {:>4}  {:>8}  {:>9}  {:<5}  {:<13}\n",
        "MAKE", "MODEL", "YEAR", "RANGE", "PRICE", "TYPE", "CAFV",
    ));
    for v in &report.matches {
        out.push_str(&format!(
            "{:<make_w$}  {:<model_w$}  {:>4}  {:>8}  {:>9}  {:<5}  {:<13}\n",
            truncate(&v.make, make_w),
            truncate(&v.model, model_w),
            format_year_opt(v.model_year),
            format_miles_opt(v.electric_range),
            format_usd_opt(v.base_msrp),
            v.vehicle_type.short_label(),
            cafv_short(v),
        ));
    }

    out.push_str(&format!("\n{} shown\n", report.matches.len()));
    out
}

fn format_markdown(report: &QueryReport) -> String {
    let mut out = String::new();
    out.push_str("# Vehicle Search\n\n");
    out.push_str(&format!(
        "Query: {} ({} of {} vehicles matched)\n\n",
        report.filter, report.match_count, report.total_vehicles
    ));

    if report.matches.is_empty() {
        out.push_str("No matches found.\n");
        return out;
    }

    out.push_str("| Make | Model | Year | Range | Price | Type | CAFV |\n");
    out.push_str("|------|-------|------|-------|-------|------|------|\n");
    for v in &report.matches {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            v.make,
            v.model,
            format_year_opt(v.model_year),
            format_miles_opt(v.electric_range),
            format_usd_opt(v.base_msrp),
            v.vehicle_type.short_label(),
            cafv_short(v),
        ));
    }
    out
}

fn format_csv(report: &QueryReport) -> String {
    let mut out = String::from("Make,Model,Year,Range (mi),Base MSRP,Type,CAFV\n");
    for v in &report.matches {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            csv_escape(&v.make),
            csv_escape(&v.model),
            v.model_year.map(|y| y.to_string()).unwrap_or_default(),
            v.electric_range
                .map(|r| (r.round() as i64).to_string())
                .unwrap_or_default(),
            v.base_msrp
                .map(|p| (p.round() as i64).to_string())
                .unwrap_or_default(),
            csv_escape(v.vehicle_type.short_label()),
            csv_escape(cafv_short(v)),
        ));
    }
    out
}

fn column_width<I: Iterator<Item = usize>>(widths: I, min: usize, max: usize) -> usize {
    widths.max().unwrap_or(min).clamp(min, max)
}
