//! ANSI table sink.

use std::io;

use flowtime_types::{RuntimeReport, StageStatus, Timeline};

use crate::marker::{percent_marker, runtime_marker, stamp_marker, subtotal_marker};

const RUNTIME_WIDTH: usize = 11; // widest regular marker, "CRASH 0.22h"
const PERCENT_WIDTH: usize = 6;

/// Render the whole report as an aligned, optionally colored table.
///
/// The stage-name column width comes from the report's shared column plan,
/// so the runtime field starts at the same offset in every category and
/// group. With `use_color` false the output is plain text, byte-stable for
/// tests and pipes.
pub fn render_console<W: io::Write>(
    report: &RuntimeReport,
    out: &mut W,
    use_color: bool,
) -> io::Result<()> {
    let p = Palette::new(use_color);
    for timeline in &report.timelines {
        writeln!(out, "{}== {} =={}", p.bold, timeline.category, p.reset)?;
        render_timeline(report, timeline, out, &p)?;
    }
    writeln!(
        out,
        "{}grand total: {:.2}h{}",
        p.bold, report.grand_total_hours, p.reset
    )
}

fn render_timeline<W: io::Write>(
    report: &RuntimeReport,
    timeline: &Timeline,
    out: &mut W,
    p: &Palette,
) -> io::Result<()> {
    let name_width = report.columns.name_width;
    for (gi, group) in timeline.groups.iter().enumerate() {
        if timeline.show_group_headers() {
            writeln!(out, "{}[{}]{}", p.dim, group.key, p.reset)?;
        }
        for (mi, run) in group.members.iter().enumerate() {
            let here = flowtime_types::StageRef { group: gi, member: mi };
            let is_bottleneck = timeline.bottleneck == Some(here);
            let color = p.status(run.status);
            let tail = if is_bottleneck { " << bottleneck" } else { "" };
            writeln!(
                out,
                "  {name:<name_width$}  {color}{runtime:>RUNTIME_WIDTH$}{reset}  \
                 {pct:>PERCENT_WIDTH$}  {start} -> {end}  {color}{status}{reset}{bold}{tail}{reset}",
                name = run.name,
                runtime = runtime_marker(run),
                pct = percent_marker(report, run),
                start = stamp_marker(run.start),
                end = stamp_marker(run.end),
                status = run.status.label(),
                color = color,
                reset = p.reset,
                bold = p.bold,
            )?;
        }
        writeln!(
            out,
            "  {name:<name_width$}  {subtotal:>RUNTIME_WIDTH$}",
            name = "subtotal",
            subtotal = subtotal_marker(group),
        )?;
    }
    Ok(())
}

struct Palette {
    reset: &'static str,
    bold: &'static str,
    dim: &'static str,
    red: &'static str,
    green: &'static str,
    yellow: &'static str,
    cyan: &'static str,
    magenta: &'static str,
}

impl Palette {
    fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                reset: "\x1b[0m",
                bold: "\x1b[1m",
                dim: "\x1b[2m",
                red: "\x1b[31m",
                green: "\x1b[32m",
                yellow: "\x1b[33m",
                cyan: "\x1b[36m",
                magenta: "\x1b[35m",
            }
        } else {
            Self {
                reset: "",
                bold: "",
                dim: "",
                red: "",
                green: "",
                yellow: "",
                cyan: "",
                magenta: "",
            }
        }
    }

    fn status(&self, status: StageStatus) -> &'static str {
        match status {
            StageStatus::Ok => self.green,
            StageStatus::Crashed => self.red,
            StageStatus::Running => self.cyan,
            StageStatus::Unknown => self.yellow,
            StageStatus::ParseError => self.magenta,
        }
    }
}
