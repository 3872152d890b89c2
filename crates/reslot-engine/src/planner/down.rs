//! One-row-downward relocation.

use reslot_common::{CircuitKey, GridLayout};
use reslot_grid::ScheduleGrid;

use crate::accessor::{move_slot, read_key_at};
use crate::error::ReorderError;
use crate::index::RowIndex;
use crate::planner::{ReorderPlanner, normalized_selection};
use crate::report::{MoveStatus, ReorderReport, SkipReason};
use crate::scratch::find_free_scratch_row;

/// Shift each selected record one row down.
///
/// An occupied destination is resolved by rotating the occupant through a
/// free scratch row; the content payloads of the two records may differ, so
/// a plain two-cell exchange is not equivalent. Scratch exhaustion skips
/// the one record. Any rejected move aborts the whole grid and the
/// enclosing transaction rolls it back.
pub struct MoveDown;

impl ReorderPlanner for MoveDown {
    fn reorder<G: ScheduleGrid>(
        &self,
        grid: &mut G,
        layout: &GridLayout,
        selection: &[CircuitKey],
    ) -> Result<ReorderReport, ReorderError> {
        let mut report = ReorderReport::default();
        let mut index = RowIndex::build(grid, layout, layout.visible_rows())?;

        let mut picked: Vec<(u32, CircuitKey)> = Vec::new();
        for key in normalized_selection(selection) {
            match index.row_of(key) {
                Some(row) => picked.push((row, key)),
                None => report.push(key, MoveStatus::Skipped(SkipReason::NotInGrid)),
            }
        }

        // Bottom-most first, so a record never collides with one that a
        // higher-up move would have pushed into its path.
        picked.sort_unstable_by(|a, b| b.0.cmp(&a.0));

        for (_, key) in picked {
            let Some(current) = index.row_of(key) else {
                continue;
            };
            let dest = current + 1;

            if dest >= layout.scratch_start {
                tracing::debug!(key = %key, row = current, "already on the last visible row");
                report.push(key, MoveStatus::Skipped(SkipReason::AtBoundary));
                continue;
            }

            match read_key_at(grid, layout, dest)? {
                None => {
                    move_slot(grid, current, dest, layout.content_col)?;
                    index.record_move(key, dest);
                    report.push(key, MoveStatus::Moved { from: current, to: dest });
                }
                Some(displaced) => {
                    let Some(scratch) = find_free_scratch_row(grid, layout)? else {
                        tracing::warn!(key = %key, "no free scratch row, leaving circuit in place");
                        report.push(key, MoveStatus::Skipped(SkipReason::NoScratchSpace));
                        continue;
                    };
                    // Rotate: occupant to scratch, mover to destination,
                    // occupant back into the vacated source row.
                    move_slot(grid, dest, scratch, layout.content_col)?;
                    move_slot(grid, current, dest, layout.content_col)?;
                    move_slot(grid, scratch, current, layout.content_col)?;
                    index.record_move(key, dest);
                    index.record_move(displaced, current);
                    report.push(key, MoveStatus::Moved { from: current, to: dest });
                }
            }
        }

        Ok(report)
    }
}
