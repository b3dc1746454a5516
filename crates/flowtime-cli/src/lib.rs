//! Command-line front end: discovery, extraction, aggregation, sinks.
//!
//! `run` is the whole program behind a testable seam: it takes the raw
//! argument iterator and two write sinks and returns the process exit
//! code, so integration tests drive it without spawning a process.

pub mod discovery;

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::{Duration, Local, NaiveDateTime};
use flowtime_error::FlowtimeError;
use flowtime_extract::{extract_stage_run, parse_datetime};
use flowtime_render::{render_console, render_html};
use flowtime_timeline::{assemble_groups, assemble_report, build_timeline};
use flowtime_types::{CategoryOrder, ExtractorConfig, RuntimeReport, StageRun};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub root: PathBuf,
    pub html_out: Option<PathBuf>,
    pub json: bool,
    pub use_color: bool,
    pub stale_minutes: i64,
    /// Fixed "now" for reproducible runs; wall clock when absent.
    pub now: Option<NaiveDateTime>,
    pub show_help: bool,
}

/// Run the analyzer end to end. Exit codes: 0 success, 1 runtime failure,
/// 2 usage error.
pub fn run<I, W, E>(args: I, out: &mut W, err: &mut E) -> i32
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let options = match parse_args(args) {
        Ok(options) => options,
        Err(message) => {
            let _ = writeln!(err, "error: {message}");
            let _ = write_usage(err);
            return 2;
        }
    };
    if options.show_help {
        return if write_usage(out).is_ok() { 0 } else { 1 };
    }

    match analyze(&options) {
        Ok(report) => match emit(&report, &options, out) {
            Ok(()) => 0,
            Err(error) => {
                let _ = writeln!(err, "error: {error}");
                1
            }
        },
        Err(error) => {
            let _ = writeln!(err, "error: {error}");
            1
        }
    }
}

/// One full analysis pass: a point-in-time snapshot, rebuilt from scratch.
fn analyze(options: &Options) -> flowtime_error::Result<RuntimeReport> {
    let now = options.now.unwrap_or_else(|| Local::now().naive_local());
    let config = ExtractorConfig {
        staleness: Duration::minutes(options.stale_minutes),
    };

    let artifacts = discovery::scan(&options.root)?;
    info!(artifacts = artifacts.len(), "extracting");

    // Discovery order is the stable key for all downstream ordering.
    let mut by_category: Vec<(String, Vec<StageRun>)> = Vec::new();
    for artifact in &artifacts {
        let run = extract_stage_run(artifact, now, &config);
        match by_category.iter_mut().find(|(c, _)| *c == run.category) {
            Some((_, runs)) => runs.push(run),
            None => by_category.push((run.category.clone(), vec![run])),
        }
    }

    let timelines = by_category
        .into_iter()
        .map(|(category, runs)| build_timeline(&category, assemble_groups(runs, now)))
        .collect();
    Ok(assemble_report(timelines, &CategoryOrder::flow_default()))
}

fn emit<W: Write>(
    report: &RuntimeReport,
    options: &Options,
    out: &mut W,
) -> flowtime_error::Result<()> {
    if options.json {
        let encoded = serde_json::to_string_pretty(report)?;
        writeln!(out, "{encoded}")?;
    } else {
        render_console(report, out, options.use_color)?;
    }
    if let Some(path) = &options.html_out {
        fs::write(path, render_html(report)).map_err(|err| FlowtimeError::ReportWrite {
            path: path.clone(),
            detail: err.to_string(),
        })?;
        info!(path = %path.display(), "wrote HTML report");
    }
    Ok(())
}

pub fn parse_args<I>(args: I) -> Result<Options, String>
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let _argv0 = iter.next();

    let mut root: Option<PathBuf> = None;
    let mut html_out = None;
    let mut json = false;
    let mut use_color = true;
    let mut stale_minutes = 5i64;
    let mut now = None;
    let mut show_help = false;

    while let Some(argument) = iter.next() {
        let arg = argument.to_string_lossy();
        match arg.as_ref() {
            "-h" | "--help" => show_help = true,
            "--json" => json = true,
            "--no-color" => use_color = false,
            "--html" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--html requires a file path".to_owned())?;
                html_out = Some(PathBuf::from(value));
            }
            "--stale-minutes" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--stale-minutes requires a number".to_owned())?;
                stale_minutes = value
                    .to_string_lossy()
                    .parse()
                    .map_err(|_| format!("invalid --stale-minutes value '{}'", value.to_string_lossy()))?;
                if stale_minutes < 0 {
                    return Err("--stale-minutes must be non-negative".to_owned());
                }
            }
            "--now" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--now requires a timestamp".to_owned())?;
                let raw = value.to_string_lossy();
                now = Some(
                    parse_datetime(&raw).ok_or_else(|| format!("invalid --now timestamp '{raw}'"))?,
                );
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown flag '{other}'"));
            }
            _ => {
                if root.is_some() {
                    return Err(format!(
                        "unexpected extra argument '{}'",
                        arg
                    ));
                }
                root = Some(PathBuf::from(argument));
            }
        }
    }

    if show_help {
        return Ok(Options {
            root: PathBuf::new(),
            html_out,
            json,
            use_color,
            stale_minutes,
            now,
            show_help,
        });
    }
    let root = root.ok_or_else(|| "missing artifact root".to_owned())?;
    Ok(Options {
        root,
        html_out,
        json,
        use_color,
        stale_minutes,
        now,
        show_help,
    })
}

fn write_usage<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(
        out,
        "usage: flowtime <artifact-root> [options]\n\n\
         options:\n\
         \x20 --html FILE         also write a self-contained HTML report\n\
         \x20 --json              print the report as JSON instead of a table\n\
         \x20 --no-color          plain-text console output\n\
         \x20 --stale-minutes N   running-vs-stalled window (default 5)\n\
         \x20 --now TS            fixed analysis time, e.g. '2024-11-12 14:00:00'\n\
         \x20 -h, --help          show this help"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        std::iter::once("flowtime")
            .chain(list.iter().copied())
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn parses_full_flag_set() {
        let options = parse_args(args(&[
            "/runs",
            "--html",
            "report.html",
            "--json",
            "--no-color",
            "--stale-minutes",
            "10",
            "--now",
            "2024-11-12 14:00:00",
        ]))
        .unwrap();
        assert_eq!(options.root, PathBuf::from("/runs"));
        assert_eq!(options.html_out, Some(PathBuf::from("report.html")));
        assert!(options.json);
        assert!(!options.use_color);
        assert_eq!(options.stale_minutes, 10);
        assert!(options.now.is_some());
        assert!(!options.show_help);
    }

    #[test]
    fn missing_root_is_a_usage_error() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["--json"])).is_err());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_args(args(&["/runs", "--stale-minutes", "soon"])).is_err());
        assert!(parse_args(args(&["/runs", "--stale-minutes", "-1"])).is_err());
        assert!(parse_args(args(&["/runs", "--now", "yesterday"])).is_err());
        assert!(parse_args(args(&["/runs", "--frobnicate"])).is_err());
    }

    #[test]
    fn help_works_without_a_root() {
        let options = parse_args(args(&["--help"])).unwrap();
        assert!(options.show_help);
    }
}
