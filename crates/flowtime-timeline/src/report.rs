use flowtime_types::{CategoryOrder, ColumnPlan, RuntimeReport, Timeline};
use tracing::info;

/// Combine all category timelines into the final [`RuntimeReport`].
///
/// Categories named in `order` render in that rank; anything unlisted
/// follows in the order the timelines arrived. The column plan is computed
/// once, here, over every stage of every category, and is the only piece
/// of state the two renderers share.
#[must_use]
pub fn assemble_report(timelines: Vec<Timeline>, order: &CategoryOrder) -> RuntimeReport {
    let mut indexed: Vec<(usize, Timeline)> = timelines.into_iter().enumerate().collect();
    indexed.sort_by_key(|(position, timeline)| {
        match order.rank(&timeline.category) {
            Some(rank) => (0, rank, *position),
            None => (1, 0, *position),
        }
    });
    let timelines: Vec<Timeline> = indexed.into_iter().map(|(_, t)| t).collect();

    let grand_total_hours: f64 = timelines.iter().map(Timeline::total_hours).sum();
    let columns = ColumnPlan::for_timelines(&timelines);
    info!(
        categories = timelines.len(),
        grand_total_hours, "assembled runtime report"
    );

    RuntimeReport {
        timelines,
        grand_total_hours,
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowtime_types::{IpoGroup, StageRun, StageStatus};

    fn stage(name: &str, group: &str, hours: f64) -> StageRun {
        StageRun {
            name: name.to_owned(),
            category: String::new(),
            group_key: group.to_owned(),
            start: None,
            end: None,
            status: StageStatus::Ok,
            runtime_hours: Some(hours),
            source_ref: format!("/runs/{name}.log").into(),
            diagnostic: None,
        }
    }

    fn timeline(category: &str, groups: Vec<(&str, Vec<StageRun>)>) -> Timeline {
        let groups = groups
            .into_iter()
            .map(|(key, members)| IpoGroup {
                key: key.to_owned(),
                subtotal_hours: members.iter().filter_map(|m| m.runtime_hours).sum(),
                has_runtime: members.iter().any(StageRun::has_numeric_runtime),
                span: None,
                members,
            })
            .collect();
        Timeline {
            category: category.to_owned(),
            groups,
            bottleneck: None,
            running: Vec::new(),
        }
    }

    #[test]
    fn categories_follow_configured_rank_then_arrival() {
        let report = assemble_report(
            vec![
                timeline("signoff", vec![]),
                timeline("floorplan_exploration", vec![]),
                timeline("construction", vec![]),
            ],
            &CategoryOrder::flow_default(),
        );
        let cats: Vec<_> = report.timelines.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(cats, ["construction", "signoff", "floorplan_exploration"]);
    }

    #[test]
    fn grand_total_sums_every_group_subtotal() {
        let report = assemble_report(
            vec![
                timeline(
                    "construction",
                    vec![("ipo1000", vec![stage("Star", "ipo1000", 7.43)])],
                ),
                timeline(
                    "signoff",
                    vec![("ipo1001", vec![stage("Auto_Pt", "ipo1001", 16.65)])],
                ),
            ],
            &CategoryOrder::flow_default(),
        );
        assert!((report.grand_total_hours - 24.08).abs() < 1e-9);
    }

    #[test]
    fn column_plan_spans_all_categories_and_groups() {
        // Name width must come from the global maximum, so runtime
        // columns align no matter which group a stage sits in.
        let report = assemble_report(
            vec![
                timeline("construction", vec![("root", vec![stage("Star", "root", 1.0)])]),
                timeline(
                    "signoff",
                    vec![("ipo1000", vec![stage("Auto_Pt_Fix", "ipo1000", 1.0)])],
                ),
            ],
            &CategoryOrder::flow_default(),
        );
        assert_eq!(report.columns.name_width, "Auto_Pt_Fix".len());
    }

    #[test]
    fn percent_is_share_of_numeric_total_only() {
        let mut unmeasured = stage("Place", "root", 0.0);
        unmeasured.runtime_hours = None;
        unmeasured.status = StageStatus::Unknown;
        let measured = stage("Star", "root", 2.0);
        let report = assemble_report(
            vec![timeline(
                "construction",
                vec![("root", vec![measured.clone(), unmeasured.clone()])],
            )],
            &CategoryOrder::flow_default(),
        );
        assert_eq!(report.percent_of_total(&measured), Some(100.0));
        // Absent runtime yields an absent share, never a fake zero.
        assert_eq!(report.percent_of_total(&unmeasured), None);
    }
}
