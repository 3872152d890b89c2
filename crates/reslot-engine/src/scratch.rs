//! Scratch row allocation.

use reslot_common::GridLayout;
use reslot_grid::ScheduleGrid;

use crate::accessor::content_present;
use crate::error::ReorderError;

/// First scratch row whose content column is empty, scanning ascending.
///
/// `None` means the scratch band is exhausted; the caller skips that one
/// record rather than aborting the operation.
pub fn find_free_scratch_row<G: ScheduleGrid>(
    grid: &G,
    layout: &GridLayout,
) -> Result<Option<u32>, ReorderError> {
    for row in layout.scratch_rows() {
        if !content_present(grid, row, layout.content_col)? {
            return Ok(Some(row));
        }
    }
    Ok(None)
}
