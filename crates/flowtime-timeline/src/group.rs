use chrono::NaiveDateTime;
use flowtime_types::{IpoGroup, StageRun};
use tracing::debug;

/// Partition one category's stage runs into iteration groups.
///
/// Keys appear in first-seen order and each partition keeps extraction
/// insertion order; nothing here re-sorts by name. A group whose members
/// all lack numeric runtime is still emitted, with `subtotal_hours` zero
/// and `has_runtime` false, so "nothing measurable" never masquerades as
/// "ran fast".
///
/// `now` stands in for the missing end of in-progress members when the
/// group span is computed.
#[must_use]
pub fn assemble_groups(runs: Vec<StageRun>, now: NaiveDateTime) -> Vec<IpoGroup> {
    let mut partitions: Vec<(String, Vec<StageRun>)> = Vec::new();
    for run in runs {
        match partitions.iter_mut().find(|(key, _)| *key == run.group_key) {
            Some((_, members)) => members.push(run),
            None => partitions.push((run.group_key.clone(), vec![run])),
        }
    }

    partitions
        .into_iter()
        .map(|(key, members)| {
            let subtotal_hours: f64 = members.iter().filter_map(|m| m.runtime_hours).sum();
            let has_runtime = members.iter().any(StageRun::has_numeric_runtime);
            let span = group_span(&members, now);
            debug!(group = %key, members = members.len(), subtotal_hours, "assembled group");
            IpoGroup {
                key,
                members,
                subtotal_hours,
                has_runtime,
                span,
            }
        })
        .collect()
}

fn group_span(members: &[StageRun], now: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let earliest = members.iter().filter_map(|m| m.start).min()?;
    let latest = members
        .iter()
        .filter(|m| m.start.is_some())
        .map(|m| m.end.unwrap_or(now))
        .max()?;
    Some((earliest, latest))
}
