use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::stage::StageRun;

/// Distinguished group key for the baseline/ungrouped run.
pub const ROOT_GROUP: &str = "root";

/// Ordered set of [`StageRun`]s sharing one iteration-group key.
///
/// Member order is the insertion order of extraction and is never
/// re-sorted by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpoGroup {
    pub key: String,
    pub members: Vec<StageRun>,
    /// Sum of `runtime_hours` over members that have one. Members without
    /// a numeric runtime are retained in `members` but excluded here.
    pub subtotal_hours: f64,
    /// False when not a single member contributed runtime. Groups are
    /// reported either way so "nothing measurable" stays visible instead
    /// of looking like a genuinely fast group.
    pub has_runtime: bool,
    /// `(min start, max end-or-now)` across members, when any member had
    /// a parsed start.
    pub span: Option<(NaiveDateTime, NaiveDateTime)>,
}

/// Position of one stage run inside a [`Timeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRef {
    pub group: usize,
    pub member: usize,
}

/// All iteration groups of one pipeline category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub category: String,
    /// Explicit groups in discovery order, [`ROOT_GROUP`] last unless it
    /// is the only group.
    pub groups: Vec<IpoGroup>,
    /// The single member with the greatest numeric runtime across all
    /// groups; ties resolved by earliest start. Absent when no member has
    /// a numeric runtime.
    pub bottleneck: Option<StageRef>,
    /// Every member currently flagged running. Independent groups can run
    /// in parallel, so any count is valid.
    pub running: Vec<StageRef>,
}

impl Timeline {
    /// Whether renderers must emit a header line ahead of each group.
    ///
    /// A property of the timeline itself, so console and HTML cannot
    /// drift apart: single-group timelines never show a header.
    #[must_use]
    pub fn show_group_headers(&self) -> bool {
        self.groups.len() > 1
    }

    /// Resolve a [`StageRef`] produced against this timeline.
    #[must_use]
    pub fn stage(&self, at: StageRef) -> Option<&StageRun> {
        self.groups.get(at.group)?.members.get(at.member)
    }

    /// Total measured runtime across every group in this timeline.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.groups.iter().map(|g| g.subtotal_hours).sum()
    }
}
