use chrono::NaiveDateTime;
use flowtime_types::{IpoGroup, StageRef, Timeline, ROOT_GROUP};
use tracing::debug;

/// Assemble one category's groups into a [`Timeline`].
///
/// Group order is discovery order with the distinguished root group moved
/// last, unless it is the only group. The bottleneck and running set are
/// recomputed here from the full member set on every call; neither is ever
/// carried over from a previous analysis pass.
#[must_use]
pub fn build_timeline(category: &str, groups: Vec<IpoGroup>) -> Timeline {
    let groups = order_groups(groups);
    let bottleneck = find_bottleneck(&groups);
    let running = find_running(&groups);
    debug!(
        category,
        groups = groups.len(),
        running = running.len(),
        has_bottleneck = bottleneck.is_some(),
        "built timeline"
    );
    Timeline {
        category: category.to_owned(),
        groups,
        bottleneck,
        running,
    }
}

fn order_groups(groups: Vec<IpoGroup>) -> Vec<IpoGroup> {
    if groups.len() <= 1 {
        return groups;
    }
    let (root, explicit): (Vec<_>, Vec<_>) = groups.into_iter().partition(|g| g.key == ROOT_GROUP);
    let mut ordered = explicit;
    ordered.extend(root);
    ordered
}

/// Argmax of `runtime_hours` over members that have one, across all
/// groups; ties resolved by earliest start. `None` when no member has a
/// numeric runtime — absent, not zero.
fn find_bottleneck(groups: &[IpoGroup]) -> Option<StageRef> {
    let mut best: Option<(f64, NaiveDateTime, StageRef)> = None;
    for (gi, group) in groups.iter().enumerate() {
        for (mi, member) in group.members.iter().enumerate() {
            let Some(hours) = member.runtime_hours else {
                continue;
            };
            // Members without a parsed start never win a tie.
            let start = member.start.unwrap_or(NaiveDateTime::MAX);
            let at = StageRef {
                group: gi,
                member: mi,
            };
            let wins = match best {
                None => true,
                Some((best_hours, best_start, _)) => {
                    hours > best_hours || (hours == best_hours && start < best_start)
                }
            };
            if wins {
                best = Some((hours, start, at));
            }
        }
    }
    best.map(|(_, _, at)| at)
}

fn find_running(groups: &[IpoGroup]) -> Vec<StageRef> {
    groups
        .iter()
        .enumerate()
        .flat_map(|(gi, group)| {
            group
                .members
                .iter()
                .enumerate()
                .filter(|(_, m)| m.status.is_running())
                .map(move |(mi, _)| StageRef {
                    group: gi,
                    member: mi,
                })
        })
        .collect()
}
