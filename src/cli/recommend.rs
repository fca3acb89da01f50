//! Recommend command handler.
//!
//! Loads the dataset, runs the advisor against the declared preference
//! profile, and renders the outcome in the requested format.

use super::cafv_short;
use crate::advisor::{Advisor, RecommendOutcome, ScoredCandidate};
use crate::config::{RecommendConfig, Validatable};
use crate::dataset::load_dataset;
use crate::output::{auto_detect_format, exit_codes, should_use_color, write_output, OutputTarget};
use crate::reports::{
    csv_escape, format_miles_opt, format_usd_opt, format_year_opt, truncate, ReportFormat,
    ReportMetadata,
};
use anyhow::Result;
use serde_json::json;

/// Run the recommend command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_recommend(config: RecommendConfig) -> Result<i32> {
    config.validate()?;

    let vehicles = load_dataset(&config.dataset)?;
    tracing::info!(
        rows = vehicles.len(),
        skipped = vehicles.skipped_rows(),
        "Dataset loaded"
    );

    let advisor = Advisor::new(config.profile.clone());
    let outcome = advisor.recommend(&vehicles);

    let target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &target);

    let rendered = match format {
        ReportFormat::Json => format_json(&outcome, &config)?,
        ReportFormat::Markdown => format_markdown(&outcome, &config),
        ReportFormat::Csv => format_csv(&outcome, &config),
        ReportFormat::Table => format_table_only(&outcome, &config),
        ReportFormat::Auto | ReportFormat::Summary => {
            let use_color = should_use_color(config.output.no_color) && target.is_terminal();
            format_summary(&outcome, &config, use_color)
        }
    };

    write_output(&rendered, &target, config.output.quiet)?;

    if outcome.has_matches() {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::NO_MATCHES)
    }
}

/// Structured JSON payload with the ranking capped at the configured size.
fn format_json(outcome: &RecommendOutcome, config: &RecommendConfig) -> Result<String> {
    let metadata = ReportMetadata::new(Some(config.dataset.display().to_string()));

    let result = match outcome {
        RecommendOutcome::Matches(rec) => json!({
            "outcome": "matches",
            "top_match": rec.top_match,
            "reasons": rec.reasons,
            "alternatives": rec.alternatives,
            "weights": rec.weights,
            "candidates_considered": rec.candidates_considered,
            "ranked": rec.ranked.iter().take(config.top).collect::<Vec<_>>(),
        }),
        RecommendOutcome::NoMatches(report) => json!({
            "outcome": "no-matches",
            "use_case": report.use_case,
            "budget": report.budget,
            "range_importance": report.range_importance,
            "hint": report.hint,
            "message": report.message(),
        }),
    };

    let payload = json!({
        "tool": "ev-advisor",
        "metadata": metadata,
        "profile": config.profile,
        "result": result,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

fn profile_line(config: &RecommendConfig) -> String {
    format!(
        "Profile: {} | {} | {}",
        config.profile.use_case.label(),
        config.profile.budget.label(),
        config.profile.range_importance.label()
    )
}

/// Human summary: top match, reasons, alternatives, comparison table.
fn format_summary(outcome: &RecommendOutcome, config: &RecommendConfig, use_color: bool) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "EV Match Report: {}",
        config
            .dataset
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
    ));
    lines.push(profile_line(config));
    lines.push(String::new());

    let rec = match outcome {
        RecommendOutcome::Matches(rec) => rec,
        RecommendOutcome::NoMatches(report) => {
            lines.push("No vehicles match these criteria in the current dataset.".to_string());
            lines.push(report.hint.message());
            return lines.join("\n");
        }
    };

    let top = &rec.top_match;
    let (score_color, reset) = score_colors(top.score_percent(), use_color);

    lines.push(format!(
        "Best Match: {} ({})",
        top.vehicle.display_name(),
        format_year_opt(top.vehicle.model_year)
    ));
    lines.push(format!("  Type:        {}", top.vehicle.vehicle_type.label()));
    lines.push(format!(
        "  Range:       {}",
        format_miles_opt(top.vehicle.electric_range)
    ));
    lines.push(format!(
        "  Price:       {}",
        format_usd_opt(top.vehicle.base_msrp)
    ));
    lines.push(format!(
        "  Match Score: {}{}%{}",
        score_color,
        top.score_percent(),
        reset
    ));
    lines.push(String::new());

    if !rec.reasons.is_empty() {
        lines.push("Why this match:".to_string());
        for reason in &rec.reasons {
            lines.push(format!("  - {reason}"));
        }
        lines.push(String::new());
    }

    if !rec.alternatives.is_empty() {
        lines.push("Alternative options (different strengths):".to_string());
        for alt in &rec.alternatives {
            lines.push(format!(
                "  {:<15} {} ({}) - {}",
                alt.kind.label(),
                alt.candidate.vehicle.display_name(),
                format_year_opt(alt.candidate.vehicle.model_year),
                alt.highlight
            ));
        }
        lines.push(String::new());
    }

    lines.push(format!("Top {} matches:", config.top.min(rec.ranked.len())));
    lines.push(comparison_table(&rec.ranked, config.top));
    lines.push(format!(
        "{} candidate(s) considered",
        rec.candidates_considered
    ));

    lines.join("\n")
}

/// Just the comparison table, for `--output table`.
fn format_table_only(outcome: &RecommendOutcome, config: &RecommendConfig) -> String {
    match outcome {
        RecommendOutcome::Matches(rec) => comparison_table(&rec.ranked, config.top),
        RecommendOutcome::NoMatches(report) => report.message(),
    }
}

/// Aligned text table of the top-ranked candidates.
fn comparison_table(ranked: &[ScoredCandidate], top: usize) -> String {
    let rows: Vec<&ScoredCandidate> = ranked.iter().take(top).collect();

    let make_w = column_width(rows.iter().map(|c| c.vehicle.make.len()), 4, 20);
    let model_w = column_width(rows.iter().map(|c| c.vehicle.model.len()), 5, 24);

    let mut out = String::new();
    out.push_str(&format!(
        "{:>3}  {:<make_w$}  {:<model_w$}  {:>4}  {:>8}  {:>9}  {:<5}  {:<13}  {:>5}\n",
        "#", "MAKE", "MODEL", "YEAR", "RANGE", "PRICE", "TYPE", "CAFV", "SCORE",
    ));

    for (idx, candidate) in rows.iter().enumerate() {
        let v = &candidate.vehicle;
        out.push_str(&format!(
            "{:>3}  {:<make_w$}  {:<model_w$}  {:>4}  {:>8}  {:>9}  {:<5}  {:<13}  {:>4}%\n",
            idx + 1,
            truncate(&v.make, make_w),
            truncate(&v.model, model_w),
            format_year_opt(v.model_year),
            format_miles_opt(v.electric_range),
            format_usd_opt(v.base_msrp),
            v.vehicle_type.short_label(),
            cafv_short(v),
            candidate.score_percent(),
        ));
    }

    out
}

/// Markdown report mirroring the summary sections.
fn format_markdown(outcome: &RecommendOutcome, config: &RecommendConfig) -> String {
    let mut out = String::new();
    out.push_str("# EV Match Report\n\n");
    out.push_str(&format!(
        "- Dataset: `{}`\n- {}\n\n",
        config.dataset.display(),
        profile_line(config)
    ));

    let rec = match outcome {
        RecommendOutcome::Matches(rec) => rec,
        RecommendOutcome::NoMatches(report) => {
            out.push_str("**No vehicles match these criteria in the current dataset.**\n\n");
            out.push_str(&format!("{}\n", report.hint.message()));
            return out;
        }
    };

    let top = &rec.top_match;
    out.push_str("## Best Match\n\n");
    out.push_str(&format!(
        "**{}** ({}) | {} | {} | {} | score {}%\n\n",
        top.vehicle.display_name(),
        format_year_opt(top.vehicle.model_year),
        top.vehicle.vehicle_type.short_label(),
        format_miles_opt(top.vehicle.electric_range),
        format_usd_opt(top.vehicle.base_msrp),
        top.score_percent(),
    ));

    if !rec.reasons.is_empty() {
        out.push_str("### Why this match\n\n");
        for reason in &rec.reasons {
            out.push_str(&format!("- {reason}\n"));
        }
        out.push('\n');
    }

    if !rec.alternatives.is_empty() {
        out.push_str("## Alternatives\n\n");
        for alt in &rec.alternatives {
            out.push_str(&format!(
                "- **{}**: {} ({}), {}\n",
                alt.kind.label(),
                alt.candidate.vehicle.display_name(),
                format_year_opt(alt.candidate.vehicle.model_year),
                alt.highlight
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "## Top {} Matches\n\n",
        config.top.min(rec.ranked.len())
    ));
    out.push_str("| # | Make | Model | Year | Range | Price | Type | CAFV | Score |\n");
    out.push_str("|---|------|-------|------|-------|-------|------|------|-------|\n");
    for (idx, candidate) in rec.ranked.iter().take(config.top).enumerate() {
        let v = &candidate.vehicle;
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {}% |\n",
            idx + 1,
            v.make,
            v.model,
            format_year_opt(v.model_year),
            format_miles_opt(v.electric_range),
            format_usd_opt(v.base_msrp),
            v.vehicle_type.short_label(),
            cafv_short(v),
            candidate.score_percent(),
        ));
    }

    out
}

/// CSV of the ranked candidates.
fn format_csv(outcome: &RecommendOutcome, config: &RecommendConfig) -> String {
    let mut out =
        String::from("Rank,Make,Model,Year,Range (mi),Base MSRP,Type,CAFV,Score (%)\n");

    let RecommendOutcome::Matches(rec) = outcome else {
        return out;
    };

    for (idx, candidate) in rec.ranked.iter().take(config.top).enumerate() {
        let v = &candidate.vehicle;
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            idx + 1,
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
            candidate.score_percent(),
        ));
    }

    out
}

/// ANSI color for the score by confidence tier.
fn score_colors(percent: i64, use_color: bool) -> (&'static str, &'static str) {
    if !use_color {
        return ("", "");
    }
    let color = match percent {
        70.. => "\x1b[32m",  // Green
        40..=69 => "\x1b[33m", // Yellow
        _ => "\x1b[31m",     // Red
    };
    (color, "\x1b[0m")
}

fn column_width<I: Iterator<Item = usize>>(widths: I, min: usize, max: usize) -> usize {
    widths.max().unwrap_or(min).clamp(min, max)
}
