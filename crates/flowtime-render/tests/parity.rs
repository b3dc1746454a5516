//! Console and HTML must agree in substance: same rows, same markers,
//! same group-header decisions, columns aligned from one shared plan.

use chrono::{NaiveDate, NaiveDateTime};
use flowtime_timeline::{assemble_groups, assemble_report, build_timeline};
use flowtime_render::{render_console, render_html, runtime_marker};
use flowtime_types::{CategoryOrder, RuntimeReport, StageRun, StageStatus};

fn dt(h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, 12)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

fn run(name: &str, group: &str, status: StageStatus, hours: Option<f64>) -> StageRun {
    StageRun {
        name: name.to_owned(),
        category: "signoff".to_owned(),
        group_key: group.to_owned(),
        start: Some(dt(8, 0)),
        end: hours.map(|_| dt(12, 0)),
        status,
        runtime_hours: hours,
        source_ref: format!("/runs/{group}/{name}.log").into(),
        diagnostic: None,
    }
}

fn report(runs: Vec<StageRun>) -> RuntimeReport {
    let timeline = build_timeline("signoff", assemble_groups(runs, dt(16, 0)));
    assemble_report(vec![timeline], &CategoryOrder::flow_default())
}

fn console_text(report: &RuntimeReport) -> String {
    let mut out = Vec::new();
    render_console(report, &mut out, false).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn single_group_emits_no_header_in_either_sink() {
    let r = report(vec![
        run("Star", "ipo1000", StageStatus::Ok, Some(0.44)),
        run("Auto_Pt", "ipo1000", StageStatus::Ok, Some(6.14)),
    ]);
    let console = console_text(&r);
    assert!(!console.contains("[ipo1000]"));
    let html = render_html(&r);
    assert!(!html.contains("group-header"));
}

#[test]
fn multi_group_emits_exactly_one_header_per_group() {
    let r = report(vec![
        run("Star", "ipo1000", StageStatus::Ok, Some(0.44)),
        run("Star", "ipo1001", StageStatus::Ok, Some(0.51)),
        run("Star", "root", StageStatus::Ok, Some(0.39)),
    ]);
    let console = console_text(&r);
    for key in ["ipo1000", "ipo1001", "root"] {
        assert_eq!(
            console.matches(&format!("[{key}]")).count(),
            1,
            "console header for {key}"
        );
    }
    let html = render_html(&r);
    assert_eq!(html.matches("group-header").count(), 3 + 1); // 3 rows + 1 CSS rule
}

#[test]
fn runtime_column_offset_is_identical_across_groups() {
    // A short name in a long-keyed group and a long name in a short-keyed
    // group: the runtime field must still start at one global offset.
    let r = report(vec![
        run("Star", "ipo1000_retime_experiment", StageStatus::Ok, Some(0.44)),
        run("Auto_Pt_Fix", "root", StageStatus::Ok, Some(0.85)),
    ]);
    let console = console_text(&r);
    let offsets: Vec<usize> = console
        .lines()
        .filter(|l| l.contains("  OK"))
        .map(|l| l.find("0.").expect("runtime marker"))
        .collect();
    assert_eq!(offsets.len(), 2);
    assert_eq!(offsets[0], offsets[1]);
}

#[test]
fn both_sinks_carry_the_same_stage_substance() {
    let runs = vec![
        run("Star", "root", StageStatus::Ok, Some(0.44)),
        run("Auto_Pt", "root", StageStatus::Crashed, Some(0.22)),
        run("Place", "root", StageStatus::Running, None),
        run("Route", "root", StageStatus::Unknown, None),
        run("Extract", "root", StageStatus::ParseError, None),
    ];
    let r = report(runs.clone());
    let console = console_text(&r);
    let html = render_html(&r);
    for stage in &runs {
        assert!(console.contains(&stage.name), "console missing {}", stage.name);
        assert!(html.contains(&stage.name), "html missing {}", stage.name);
        let marker = runtime_marker(stage);
        assert!(console.contains(&marker), "console missing marker {marker}");
        assert!(html.contains(&marker), "html missing marker {marker}");
    }
    // The bottleneck is flagged in both.
    assert!(console.contains("<< bottleneck"));
    assert!(html.contains("bottleneck"));
}

#[test]
fn stage_names_are_never_suffixed_with_group_keys() {
    let r = report(vec![
        run("Star", "ipo1000", StageStatus::Ok, Some(0.44)),
        run("Star", "ipo1001", StageStatus::Ok, Some(0.51)),
    ]);
    let console = console_text(&r);
    // Disambiguation happens via headers, never by rewriting the name.
    assert!(!console.contains("Star_ipo1000"));
    assert!(!console.contains("Star.ipo1000"));
    assert_eq!(console.matches("[ipo1000]").count(), 1);
}
