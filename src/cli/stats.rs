//! Stats command handler.
//!
//! Renders a deterministic summary of the loaded dataset: headline
//! metrics, type distribution, top manufacturers, yearly series, range
//! trend, model catalog, and per-field coverage.

use crate::config::{StatsConfig, Validatable};
use crate::dataset::{load_dataset, summarize, DatasetSummary, StatsOptions};
use crate::output::{auto_detect_format, exit_codes, write_output, OutputTarget};
use crate::reports::{ReportFormat, ReportMetadata};
use anyhow::Result;

/// Run the stats command, returning the desired exit code.
pub fn run_stats(config: StatsConfig) -> Result<i32> {
    config.validate()?;

    let vehicles = load_dataset(&config.dataset)?;
    let options = StatsOptions {
        min_year: config.min_year,
        top_n: config.top,
    };
    let summary = summarize(&vehicles, &options);

    let target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &target);

    let rendered = match format {
        ReportFormat::Json => format_json(&summary, &config)?,
        ReportFormat::Markdown => format_markdown(&summary, &config),
        _ => format_summary(&summary, &config),
    };

    write_output(&rendered, &target, config.output.quiet)?;
    Ok(exit_codes::SUCCESS)
}

fn format_json(summary: &DatasetSummary, config: &StatsConfig) -> Result<String> {
    let payload = serde_json::json!({
        "tool": "ev-advisor",
        "metadata": ReportMetadata::new(Some(config.dataset.display().to_string())),
        "summary": summary,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

fn format_summary(summary: &DatasetSummary, config: &StatsConfig) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Dataset Summary: {}",
        config
            .dataset
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
    ));
    lines.push(String::new());
    lines.push(format!("Total Vehicles:  {}", summary.total_vehicles));
    lines.push(format!("Manufacturers:   {}", summary.manufacturer_count));
    lines.push(match summary.average_range {
        Some(avg) => format!("Average Range:   {avg:.0} mi"),
        None => "Average Range:   N/A".to_string(),
    });
    lines.push(format!("Counties:        {}", summary.county_count));
    lines.push(String::new());

    if !summary.type_distribution.is_empty() {
        lines.push("Vehicle Types:".to_string());
        for share in &summary.type_distribution {
            lines.push(format!(
                "  {:<45} {:>8}  ({:.1}%)",
                share.label, share.count, share.percentage
            ));
        }
        lines.push(String::new());
    }

    if !summary.top_makes.is_empty() {
        lines.push(format!("Top {} Manufacturers:", summary.top_makes.len()));
        for make in &summary.top_makes {
            lines.push(format!("  {:<20} {:>8}", make.make, make.count));
        }
        lines.push(String::new());
    }

    if !summary.yearly_counts.is_empty() {
        lines.push(format!(
            "Registrations by Model Year (from {}):",
            config.min_year
        ));
        for yc in &summary.yearly_counts {
            lines.push(format!("  {:<6} {:>8}", yc.year, yc.count));
        }
        lines.push(String::new());
    }

    if !summary.range_trend.is_empty() {
        lines.push("Range Trend (mean / max mi):".to_string());
        for trend in &summary.range_trend {
            lines.push(format!(
                "  {:<6} {:>6.0} / {:>6.0}",
                trend.year, trend.mean_range, trend.max_range
            ));
        }
        lines.push(String::new());
    }

    if !summary.catalog.is_empty() {
        lines.push("Model Catalog (by registration count):".to_string());
        for entry in &summary.catalog {
            lines.push(format!(
                "  {:<30} {:>6.0} mi avg  ({} registered)",
                entry.vehicle, entry.mean_range, entry.count
            ));
        }
        lines.push(String::new());
    }

    lines.push("Field Coverage:".to_string());
    lines.push(format!("  Base MSRP:       {:>5.1}%", summary.coverage.msrp));
    lines.push(format!(
        "  Electric Range:  {:>5.1}%",
        summary.coverage.electric_range
    ));
    lines.push(format!(
        "  Model Year:      {:>5.1}%",
        summary.coverage.model_year
    ));
    lines.push(format!(
        "  CAFV Status:     {:>5.1}%",
        summary.coverage.cafv_eligibility
    ));
    lines.push(format!(
        "  Location:        {:>5.1}%",
        summary.coverage.location
    ));

    lines.join("\n")
}

fn format_markdown(summary: &DatasetSummary, config: &StatsConfig) -> String {
    let mut out = String::new();
    out.push_str("# Dataset Summary\n\n");
    out.push_str(&format!("Dataset: `{}`\n\n", config.dataset.display()));

    out.push_str("| Metric | Value |\n|--------|-------|\n");
    out.push_str(&format!("| Total vehicles | {} |\n", summary.total_vehicles));
    out.push_str(&format!(
        "| Manufacturers | {} |\n",
        summary.manufacturer_count
    ));
    out.push_str(&match summary.average_range {
        Some(avg) => format!("| Average range | {avg:.0} mi |\n"),
        None => "| Average range | N/A |\n".to_string(),
    });
    out.push_str(&format!("| Counties | {} |\n\n", summary.county_count));

    if !summary.type_distribution.is_empty() {
        out.push_str("## Vehicle Types\n\n");
        out.push_str("| Type | Count | Share |\n|------|-------|-------|\n");
        for share in &summary.type_distribution {
            out.push_str(&format!(
                "| {} | {} | {:.1}% |\n",
                share.label, share.count, share.percentage
            ));
        }
        out.push('\n');
    }

    if !summary.top_makes.is_empty() {
        out.push_str("## Top Manufacturers\n\n");
        out.push_str("| Make | Count |\n|------|-------|\n");
        for make in &summary.top_makes {
            out.push_str(&format!("| {} | {} |\n", make.make, make.count));
        }
        out.push('\n');
    }

    if !summary.yearly_counts.is_empty() {
        out.push_str("## Registrations by Model Year\n\n");
        out.push_str("| Year | Count |\n|------|-------|\n");
        for yc in &summary.yearly_counts {
            out.push_str(&format!("| {} | {} |\n", yc.year, yc.count));
        }
        out.push('\n');
    }

    out
}
