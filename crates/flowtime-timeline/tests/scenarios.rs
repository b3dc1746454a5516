//! End-to-end aggregation scenarios over hand-built stage records.

use chrono::{NaiveDate, NaiveDateTime};
use flowtime_timeline::{assemble_groups, assemble_report, build_timeline};
use flowtime_types::{CategoryOrder, StageRun, StageStatus};

fn dt(h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, 12)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

fn ok_run(name: &str, group: &str, hours: f64, start: NaiveDateTime) -> StageRun {
    StageRun {
        name: name.to_owned(),
        category: "signoff".to_owned(),
        group_key: group.to_owned(),
        start: Some(start),
        end: Some(start + chrono::Duration::milliseconds((hours * 3_600_000.0) as i64)),
        status: StageStatus::Ok,
        runtime_hours: Some(hours),
        source_ref: format!("/runs/{group}/{name}.log").into(),
        diagnostic: None,
    }
}

#[test]
fn single_group_pipeline_totals_and_bottleneck() {
    let runs = vec![
        ok_run("Star", "ipo1000", 0.44, dt(8, 0)),
        ok_run("Auto_Pt", "ipo1000", 6.14, dt(8, 30)),
        ok_run("Auto_Pt_Fix", "ipo1000", 0.85, dt(15, 0)),
    ];
    let timeline = build_timeline("signoff", assemble_groups(runs, dt(16, 0)));
    let report = assemble_report(vec![timeline], &CategoryOrder::flow_default());

    assert!((report.grand_total_hours - 7.43).abs() < 1e-9);
    let timeline = &report.timelines[0];
    assert_eq!(
        timeline.stage(timeline.bottleneck.unwrap()).unwrap().name,
        "Auto_Pt"
    );
    // One group: renderers must not emit a group header.
    assert!(!timeline.show_group_headers());
}

#[test]
fn two_group_pipeline_keeps_discovery_order_and_sums_both() {
    let runs = vec![
        ok_run("Star", "ipo1000", 0.44, dt(8, 0)),
        ok_run("Auto_Pt", "ipo1000", 6.14, dt(8, 30)),
        ok_run("Auto_Pt_Fix", "ipo1000", 0.85, dt(15, 0)),
        ok_run("Star", "ipo1001", 0.51, dt(9, 0)),
        ok_run("Auto_Pt", "ipo1001", 16.14, dt(9, 30)),
    ];
    let timeline = build_timeline("signoff", assemble_groups(runs, dt(16, 0)));
    let report = assemble_report(vec![timeline], &CategoryOrder::flow_default());

    let timeline = &report.timelines[0];
    assert!(timeline.show_group_headers());
    let keys: Vec<_> = timeline.groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, ["ipo1000", "ipo1001"]);
    assert!((timeline.groups[0].subtotal_hours - 7.43).abs() < 1e-9);
    assert!((timeline.groups[1].subtotal_hours - 16.65).abs() < 1e-9);
    assert!((report.grand_total_hours - 24.08).abs() < 1e-9);
    // Each group carries only its own members.
    assert!(timeline.groups[0].members.iter().all(|m| m.group_key == "ipo1000"));
    assert!(timeline.groups[1].members.iter().all(|m| m.group_key == "ipo1001"));
}

#[test]
fn reassembling_unchanged_inputs_is_bit_identical() {
    let runs = vec![
        ok_run("Star", "ipo1000", 0.44, dt(8, 0)),
        ok_run("Auto_Pt", "root", 6.14, dt(8, 30)),
    ];
    let build = |runs: Vec<StageRun>| {
        let timeline = build_timeline("signoff", assemble_groups(runs, dt(16, 0)));
        assemble_report(vec![timeline], &CategoryOrder::flow_default())
    };
    let first = build(runs.clone());
    let second = build(runs);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
