//! Bubble-style upward compaction.

use reslot_common::{CircuitKey, GridLayout};
use reslot_grid::ScheduleGrid;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::accessor::swap_slots;
use crate::error::ReorderError;
use crate::index::OccupiedRows;
use crate::planner::{ReorderPlanner, normalized_selection};
use crate::report::{MoveStatus, ReorderReport, SkipReason};

/// Bubble every selected record upward until fixpoint.
///
/// Passes over adjacent pairs of the occupied-row ladder swap a selected
/// record with an unselected predecessor until a full pass changes nothing:
/// each selected record ends at the top of the grid or directly beneath the
/// preceding selected record, and selected records never pass each other.
/// Both rows of a pair are occupied, so the exchange is a direct two-cell
/// swap, no scratch row involved. A rejected swap skips that pair and the
/// pass continues; unlike Move-Down, a move failure never aborts the grid.
pub struct MoveUp;

impl ReorderPlanner for MoveUp {
    fn reorder<G: ScheduleGrid>(
        &self,
        grid: &mut G,
        layout: &GridLayout,
        selection: &[CircuitKey],
    ) -> Result<ReorderReport, ReorderError> {
        let mut report = ReorderReport::default();
        let mut ladder = OccupiedRows::scan(grid, layout, selection)?;

        let present: FxHashSet<CircuitKey> =
            ladder.entries().iter().map(|e| e.key).collect();
        for key in normalized_selection(selection) {
            if !present.contains(&key) {
                report.push(key, MoveStatus::Skipped(SkipReason::NotInGrid));
            }
        }

        // Start rows in ascending order, for the final per-key outcomes.
        let starts: Vec<(CircuitKey, u32)> = ladder
            .entries()
            .iter()
            .filter(|e| e.selected)
            .map(|e| (e.key, e.row))
            .collect();

        let mut swap_failed: FxHashSet<CircuitKey> = FxHashSet::default();
        loop {
            let mut changed = false;
            for i in 1..ladder.len() {
                let here = ladder.entries()[i];
                let above = ladder.entries()[i - 1];
                if !(here.selected && !above.selected) {
                    continue;
                }
                match swap_slots(grid, here.row, above.row, layout.content_col) {
                    Ok(()) => {
                        ladder.swap_occupants(i);
                        changed = true;
                    }
                    Err(e) => {
                        tracing::warn!(key = %here.key, row = here.row, error = %e, "bubble swap rejected, leaving pair in place");
                        swap_failed.insert(here.key);
                    }
                }
            }
            if !changed {
                break;
            }
        }

        let finals: FxHashMap<CircuitKey, u32> = ladder
            .entries()
            .iter()
            .map(|e| (e.key, e.row))
            .collect();
        for (key, from) in starts {
            let to = finals[&key];
            let status = if to != from {
                MoveStatus::Moved { from, to }
            } else if swap_failed.contains(&key) {
                MoveStatus::Skipped(SkipReason::SwapFailed)
            } else {
                MoveStatus::Unmoved
            };
            report.push(key, status);
        }

        Ok(report)
    }
}
