use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Outcome classification of a single stage run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// The stage completed and both timestamps parsed.
    Ok,
    /// A recognized failure signature was found in the artifact.
    Crashed,
    /// No end timestamp yet and the artifact is fresh enough to be live.
    Running,
    /// The stage started but its log went stale without completing.
    /// Distinct from [`StageStatus::Running`]: the artifact stopped moving.
    Unknown,
    /// The artifact is present but unparsable or contradictory.
    ParseError,
}

impl StageStatus {
    /// Fixed-vocabulary label used by both renderers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Crashed => "CRASHED",
            Self::Running => "RUNNING",
            Self::Unknown => "UNKNOWN",
            Self::ParseError => "PARSE_ERROR",
        }
    }

    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// One execution instance of a named stage, reconstructed from a single
/// artifact snapshot.
///
/// Invariant: `name` is the canonical stage identifier and never embeds
/// `group_key`. Renderers that must disambiguate equally-named stages
/// across groups do so with group headers, not by rewriting the name —
/// this keeps the name set identical across groups so columns align.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRun {
    /// Canonical stage identifier, stable across groups.
    pub name: String,
    /// Coarse pipeline phase (e.g. `construction`, `signoff`).
    pub category: String,
    /// Iteration-group key; [`crate::ROOT_GROUP`] is the distinguished
    /// baseline key.
    pub group_key: String,
    /// Wall-clock start, when one could be parsed.
    pub start: Option<NaiveDateTime>,
    /// Wall-clock end; absent while in progress or after a crash that
    /// left no completion record.
    pub end: Option<NaiveDateTime>,
    pub status: StageStatus,
    /// Measured (or crash-recovered partial) runtime. Absent means "could
    /// not be measured", which is different from zero.
    pub runtime_hours: Option<f64>,
    /// Absolute path of the originating artifact, resolved at extraction
    /// time so renderers can link it from anywhere.
    pub source_ref: PathBuf,
    /// Human-readable reason, populated for `ParseError` and `Crashed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl StageRun {
    /// True when this run contributes to subtotals and is bottleneck
    /// eligible.
    #[must_use]
    pub fn has_numeric_runtime(&self) -> bool {
        self.runtime_hours.is_some()
    }
}
