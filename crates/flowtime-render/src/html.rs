//! Self-contained HTML sink: one page, inline CSS, no external assets.

use flowtime_types::{RuntimeReport, StageRef, StageStatus, Timeline};

use crate::marker::{percent_marker, runtime_marker, stamp_marker, subtotal_marker};

const PAGE_CSS: &str = "\
body { font-family: monospace; background: #1b1b1b; color: #ddd; margin: 2em; }\n\
h1 { font-size: 1.3em; } h2 { font-size: 1.1em; margin-top: 1.5em; }\n\
table { border-collapse: collapse; }\n\
td, th { padding: 2px 10px; text-align: left; }\n\
tr.group-header th { background: #333; }\n\
tr.subtotal td { border-top: 1px solid #555; }\n\
.status-ok { color: #7c7; } .status-crashed { color: #e66; }\n\
.status-running { color: #6cc; } .status-unknown { color: #cc6; }\n\
.status-parse_error { color: #c6c; }\n\
tr.bottleneck td:first-child::after { content: ' \\00AB bottleneck'; font-weight: bold; }\n\
p.grand { font-weight: bold; }\n";

/// Render the whole report as one self-contained page.
///
/// Same substance as the console sink: same rows, same runtime markers,
/// and the group-header suppression rule comes from the timeline itself.
/// `source_ref` is already absolute, so rows can link it from anywhere.
#[must_use]
pub fn render_html(report: &RuntimeReport) -> String {
    let mut page = String::with_capacity(4096);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<title>flowtime runtime report</title>\n<style>\n");
    page.push_str(PAGE_CSS);
    page.push_str("</style>\n</head>\n<body>\n<h1>Runtime report</h1>\n");

    for timeline in &report.timelines {
        render_timeline(report, timeline, &mut page);
    }

    page.push_str(&format!(
        "<p class=\"grand\">grand total: {:.2}h</p>\n</body>\n</html>\n",
        report.grand_total_hours
    ));
    page
}

fn render_timeline(report: &RuntimeReport, timeline: &Timeline, page: &mut String) {
    page.push_str(&format!("<h2>{}</h2>\n<table>\n", escape(&timeline.category)));
    page.push_str(
        "<tr><th>stage</th><th>runtime</th><th>%</th>\
         <th>start</th><th>end</th><th>status</th><th>source</th></tr>\n",
    );
    for (gi, group) in timeline.groups.iter().enumerate() {
        if timeline.show_group_headers() {
            page.push_str(&format!(
                "<tr class=\"group-header\"><th colspan=\"7\">{}</th></tr>\n",
                escape(&group.key)
            ));
        }
        for (mi, run) in group.members.iter().enumerate() {
            let here = StageRef { group: gi, member: mi };
            let mut classes = format!("status-{}", status_class(run.status));
            if timeline.bottleneck == Some(here) {
                classes.push_str(" bottleneck");
            }
            page.push_str(&format!(
                "<tr class=\"{classes}\"><td>{name}</td><td>{runtime}</td><td>{pct}</td>\
                 <td>{start}</td><td>{end}</td><td>{status}</td>\
                 <td><a href=\"file://{href}\">log</a></td></tr>\n",
                name = escape(&run.name),
                runtime = escape(&runtime_marker(run)),
                pct = percent_marker(report, run),
                start = stamp_marker(run.start),
                end = stamp_marker(run.end),
                status = run.status.label(),
                href = escape(&run.source_ref.display().to_string()),
            ));
        }
        page.push_str(&format!(
            "<tr class=\"subtotal\"><td>subtotal</td><td colspan=\"6\">{}</td></tr>\n",
            escape(&subtotal_marker(group))
        ));
    }
    page.push_str("</table>\n");
}

fn status_class(status: StageStatus) -> &'static str {
    match status {
        StageStatus::Ok => "ok",
        StageStatus::Crashed => "crashed",
        StageStatus::Running => "running",
        StageStatus::Unknown => "unknown",
        StageStatus::ParseError => "parse_error",
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_names() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
