//! Format command results as text or JSON.

use crate::error::ApiError;
use crate::orientation::{DecisionSource, OrientationDecision};
use crate::pipeline::{ConvertPlan, NormalizeSummary, TimeMajorSummary, ValidateSummary};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn on_off(swap: bool) -> &'static str {
    if swap {
        "on"
    } else {
        "off"
    }
}

fn orientation_note(decision: &OrientationDecision) -> String {
    match decision.source {
        DecisionSource::Forced => format!("swap={} (forced)", on_off(decision.swap)),
        DecisionSource::Inferred => format!(
            "swap={} (out-of-range swap={} no-swap={} over {} samples)",
            on_off(decision.swap),
            decision.oob_swap,
            decision.oob_no_swap,
            decision.samples
        ),
    }
}

pub fn format_time_major_summary(summary: &TimeMajorSummary, verbose: bool) -> String {
    let mut out = format!(
        "OK: map=({}x{}) N={} T={} swap={}\n",
        summary.header.width,
        summary.header.height,
        summary.agents,
        summary.horizon,
        on_off(summary.orientation.swap)
    );
    if verbose {
        out.push_str(&format!("  Orientation: {}\n", orientation_note(&summary.orientation)));
        if let Some(cap) = summary.max_agents {
            out.push_str(&format!("  Agent cap: {}\n", cap));
        }
        out.push_str(&format!("  Out-of-range cells: {}\n", summary.out_of_range.len()));
    }
    out.push_str(&format!("Wrote {}", summary.output.display()));
    out
}

pub fn format_convert_summary(plan: &ConvertPlan, id_offset: u32, verbose: bool) -> String {
    let mut out = String::new();
    if plan.report.is_clean() {
        out.push_str("Validation passed\n");
    } else {
        out.push_str(&format!(
            "Validation found {} issue(s) (continued)\n",
            plan.report.issue_count()
        ));
    }
    if verbose {
        out.push_str(&format!("  Orientation: {}\n", orientation_note(&plan.orientation)));
        out.push_str(&format!("  Cells checked: {}\n", plan.report.cells_checked));
    }
    let ids = if plan.agents == 0 {
        "none".to_string()
    } else {
        let last = u64::from(id_offset) + plan.agents as u64 - 1;
        format!("{}..={}", id_offset, last)
    };
    out.push_str(&format!(
        "Wrote {} agents (ids {}) to {}",
        plan.agents,
        ids,
        plan.output.display()
    ));
    out
}

pub fn format_normalize_summary(summary: &NormalizeSummary) -> String {
    format!(
        "Normalized to {} steps across {} agents -> {}",
        summary.horizon,
        summary.agents,
        summary.output.display()
    )
}

/// Validation report with per-kind counts as a table.
pub fn format_validation_text(summary: &ValidateSummary, verbose: bool) -> String {
    let report = &summary.report;
    let mut out = format!("{}\n\n", format_section_heading("Validation"));
    out.push_str(&format!(
        "  Map: {}x{} ({} passable cells)\n",
        summary.header.width, summary.header.height, summary.passable_cells
    ));
    out.push_str(&format!("  Agents: {}\n", report.agents));
    out.push_str(&format!("  Cells checked: {}\n", report.cells_checked));
    if verbose {
        out.push_str(&format!(
            "  Orientation: {}\n",
            orientation_note(&summary.orientation)
        ));
    }
    out.push('\n');

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Issue", "Count"]);
    for (kind, count) in report.counts_by_kind() {
        table.add_row(vec![kind.to_string(), count.to_string()]);
    }
    out.push_str(&format!("{}\n\n", table));

    if report.is_clean() {
        out.push_str("OK: no issues");
    } else {
        out.push_str(&format!("NG: found {} issues", report.issue_count()));
    }
    out
}

pub fn format_validation_json(summary: &ValidateSummary) -> Result<String, ApiError> {
    let report = &summary.report;
    let counts: serde_json::Map<String, serde_json::Value> = report
        .counts_by_kind()
        .into_iter()
        .map(|(kind, n)| (kind.to_string(), json!(n)))
        .collect();
    let value = json!({
        "checked_at": chrono::Utc::now().to_rfc3339(),
        "valid": report.is_clean(),
        "map": {
            "width": summary.header.width,
            "height": summary.header.height,
            "passable_cells": summary.passable_cells,
        },
        "orientation": summary.orientation,
        "agents": report.agents,
        "cells_checked": report.cells_checked,
        "issue_count": report.issue_count(),
        "counts": counts,
        "issues": report.issues,
    });
    serde_json::to_string_pretty(&value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize report: {}", e)))
}
