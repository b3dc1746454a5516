use serde::{Deserialize, Serialize};

use crate::group::Timeline;
use crate::stage::StageRun;

/// Display width of a canonical stage name.
///
/// Stage identifiers come out of tool log file names, so character count
/// is an accurate terminal-cell measure here.
#[must_use]
pub fn display_width(name: &str) -> usize {
    name.chars().count()
}

/// Explicit category display ranking, passed into report assembly at
/// construction time instead of living in a global table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryOrder(Vec<String>);

impl CategoryOrder {
    #[must_use]
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(categories.into_iter().map(Into::into).collect())
    }

    /// Conventional physical-design phase ordering.
    #[must_use]
    pub fn flow_default() -> Self {
        Self::new(["construction", "signoff"])
    }

    /// Rank of a category, or `None` for categories outside the
    /// configured list (they keep their discovery order, after all
    /// ranked ones).
    #[must_use]
    pub fn rank(&self, category: &str) -> Option<usize> {
        self.0.iter().position(|c| c == category)
    }
}

/// Shared column plan computed once over the whole report.
///
/// `name_width` is the maximum stage-name display width across every
/// category and group, so the runtime/timestamp/status fields start at
/// the same offset everywhere. Columns are never computed per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPlan {
    pub name_width: usize,
}

impl ColumnPlan {
    pub const MIN_NAME_WIDTH: usize = "stage".len();

    /// Plan over every stage of every timeline.
    #[must_use]
    pub fn for_timelines(timelines: &[Timeline]) -> Self {
        let widest = timelines
            .iter()
            .flat_map(|t| &t.groups)
            .flat_map(|g| &g.members)
            .map(|m| display_width(&m.name))
            .max()
            .unwrap_or(0);
        Self {
            name_width: widest.max(Self::MIN_NAME_WIDTH),
        }
    }
}

/// The rendered-ready aggregate for one analysis run.
///
/// Sole owner of every timeline; renderers receive `&RuntimeReport` and
/// perform no mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeReport {
    /// Timelines in configured category order.
    pub timelines: Vec<Timeline>,
    /// Sum of all group subtotals across all categories.
    pub grand_total_hours: f64,
    pub columns: ColumnPlan,
}

impl RuntimeReport {
    /// Share of the grand total attributable to one stage, in percent.
    ///
    /// Absent runtimes are excluded from numerator and denominator alike,
    /// never coerced to zero, so the return is `None` exactly when the
    /// stage has no numeric runtime (or nothing in the report does).
    #[must_use]
    pub fn percent_of_total(&self, run: &StageRun) -> Option<f64> {
        let hours = run.runtime_hours?;
        if self.grand_total_hours > 0.0 {
            Some(hours / self.grand_total_hours * 100.0)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_is_position_in_configured_list() {
        let order = CategoryOrder::flow_default();
        assert_eq!(order.rank("construction"), Some(0));
        assert_eq!(order.rank("signoff"), Some(1));
        assert_eq!(order.rank("floorplan_exploration"), None);
    }

    #[test]
    fn column_plan_never_narrower_than_header() {
        let plan = ColumnPlan::for_timelines(&[]);
        assert_eq!(plan.name_width, ColumnPlan::MIN_NAME_WIDTH);
    }
}
