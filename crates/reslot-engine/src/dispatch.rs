//! Multi-panel entry point.
//!
//! The caller resolves the selection and partitions it by owning panel;
//! this module walks the groups, asks the resolver for each panel's
//! schedule grid, and runs the chosen planner inside a transaction per
//! grid. Panels without a resolvable schedule are skipped; an empty
//! selection is "nothing to do", not a failure.

use reslot_common::{CircuitKey, GridLayout};
use reslot_grid::ScheduleGrid;

use crate::error::ReorderError;
use crate::planner::{MoveDown, MoveUp, ReorderPlanner};
use crate::report::ReorderReport;
use crate::transaction::GridTransaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// The selected keys of one owning panel.
#[derive(Debug, Clone)]
pub struct PanelGroup {
    pub panel: String,
    pub keys: Vec<CircuitKey>,
}

impl PanelGroup {
    pub fn new(panel: impl Into<String>, keys: Vec<CircuitKey>) -> Self {
        Self {
            panel: panel.into(),
            keys,
        }
    }
}

/// External lookup from a panel to its schedule grid.
///
/// Returning `None` means no schedule view exists for that panel; the
/// driver skips the group and keeps going.
pub trait PanelResolver {
    type Grid: ScheduleGrid;

    fn schedule_for(&mut self, panel: &str) -> Option<&mut Self::Grid>;
}

/// What one `move_circuits` call did across all panels.
#[derive(Debug, Default)]
pub struct MoveSummary {
    reports: Vec<(String, ReorderReport)>,
    panels_skipped: usize,
}

impl MoveSummary {
    /// True when the resolved selection was empty: no panel was touched and
    /// none was skipped.
    pub fn is_nothing_to_do(&self) -> bool {
        self.reports.is_empty() && self.panels_skipped == 0
    }

    pub fn reports(&self) -> &[(String, ReorderReport)] {
        &self.reports
    }

    pub fn report_for(&self, panel: &str) -> Option<&ReorderReport> {
        self.reports
            .iter()
            .find(|(name, _)| name == panel)
            .map(|(_, report)| report)
    }

    pub fn panels_skipped(&self) -> usize {
        self.panels_skipped
    }

    pub fn moved_count(&self) -> usize {
        self.reports.iter().map(|(_, r)| r.moved_count()).sum()
    }
}

/// Move the selected circuits of every group one row in `direction`.
///
/// Each panel's relocations run inside one [`GridTransaction`]: committed
/// on success, rolled back if the planner aborts. An abort stops the walk
/// and propagates; panels committed before it stay committed.
pub fn move_circuits<R: PanelResolver>(
    resolver: &mut R,
    groups: &[PanelGroup],
    direction: Direction,
    layout: &GridLayout,
) -> Result<MoveSummary, ReorderError> {
    layout.validate()?;

    let mut summary = MoveSummary::default();
    for group in groups {
        if group.keys.is_empty() {
            continue;
        }
        let Some(grid) = resolver.schedule_for(&group.panel) else {
            tracing::warn!(panel = %group.panel, "no schedule grid for panel, skipping");
            summary.panels_skipped += 1;
            continue;
        };

        tracing::debug!(
            panel = %group.panel,
            selected = group.keys.len(),
            direction = ?direction,
            "reordering panel schedule"
        );
        let mut tx = GridTransaction::begin(grid)?;
        let report = match direction {
            Direction::Up => MoveUp.reorder(tx.grid(), layout, &group.keys)?,
            Direction::Down => MoveDown.reorder(tx.grid(), layout, &group.keys)?,
        };
        tx.commit();
        tracing::debug!(panel = %group.panel, moved = report.moved_count(), "committed");
        summary.reports.push((group.panel.clone(), report));
    }
    Ok(summary)
}
