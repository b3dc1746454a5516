//! Aggregation over extracted stage records: iteration-group assembly,
//! per-category timeline construction, and report-level totals.
//!
//! Everything here consumes immutable [`flowtime_types::StageRun`] values
//! produced upstream and computes derived structure from scratch on every
//! call. Nothing is cached across analysis runs; idempotence falls out of
//! recomputing from the same inputs.

mod group;
mod report;
mod timeline;

pub use group::assemble_groups;
pub use report::assemble_report;
pub use timeline::build_timeline;
