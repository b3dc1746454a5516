//! Core data model for the flowtime runtime-timeline analyzer.
//!
//! Everything in this crate is plain data: records are created once by the
//! extraction pass, aggregated into groups and timelines, and never mutated
//! afterwards. A re-run of the analyzer produces a fresh set of records
//! rather than updating an old one, so no type here carries interior
//! mutability or any handle back to the filesystem.
//!
//! Layering (leaves first):
//!
//! - [`Artifact`] — one raw input handed to the extractor by discovery.
//! - [`StageRun`] — one execution instance of a named stage.
//! - [`IpoGroup`] — all stage runs sharing an iteration-group key.
//! - [`Timeline`] — all groups of one pipeline category.
//! - [`RuntimeReport`] — every timeline plus the cross-category totals and
//!   the shared column plan consumed by the renderers.

mod artifact;
mod group;
mod report;
mod stage;

pub use artifact::{Artifact, ExtractorConfig};
pub use group::{IpoGroup, StageRef, Timeline, ROOT_GROUP};
pub use report::{display_width, CategoryOrder, ColumnPlan, RuntimeReport};
pub use stage::{StageRun, StageStatus};
