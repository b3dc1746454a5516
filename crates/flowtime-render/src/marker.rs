//! Row-substance vocabulary shared by the console and HTML sinks.
//!
//! A stage without a numeric runtime must render an explicit marker —
//! never a blank, never a zero — so a viewer can tell "ran in ~0 time"
//! from "could not be measured".

use chrono::NaiveDateTime;
use flowtime_types::{IpoGroup, RuntimeReport, StageRun, StageStatus};

/// Runtime field text for one stage.
#[must_use]
pub fn runtime_marker(run: &StageRun) -> String {
    match (run.status, run.runtime_hours) {
        (StageStatus::Crashed, Some(hours)) => format!("CRASH {hours:.2}h"),
        (StageStatus::Crashed, None) => "CRASH".to_owned(),
        (StageStatus::Running, _) => "running".to_owned(),
        (StageStatus::Unknown, _) => "stale?".to_owned(),
        (StageStatus::ParseError, _) => "parse!".to_owned(),
        (StageStatus::Ok, Some(hours)) => format!("{hours:.2}h"),
        // Ok without a runtime cannot be produced by extraction; keep the
        // marker total anyway.
        (StageStatus::Ok, None) => "?".to_owned(),
    }
}

/// Percent-of-grand-total field text; `-` when the share is undefined.
#[must_use]
pub fn percent_marker(report: &RuntimeReport, run: &StageRun) -> String {
    report
        .percent_of_total(run)
        .map_or_else(|| "-".to_owned(), |pct| format!("{pct:.1}%"))
}

/// Timestamp field text; `-` while the stamp is absent.
#[must_use]
pub fn stamp_marker(stamp: Option<NaiveDateTime>) -> String {
    stamp.map_or_else(
        || "-".to_owned(),
        |s| s.format("%m/%d %H:%M").to_string(),
    )
}

/// Subtotal line text for one group.
#[must_use]
pub fn subtotal_marker(group: &IpoGroup) -> String {
    if group.has_runtime {
        format!("{:.2}h", group.subtotal_hours)
    } else {
        "0.00h (no measurable runtime)".to_owned()
    }
}
