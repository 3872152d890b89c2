//! Cell-level helpers over the grid boundary.
//!
//! The only places where backend errors pick up coordinates and raw cell
//! text becomes engine data.

use reslot_common::{CircuitKey, GridLayout};
use reslot_grid::ScheduleGrid;

use crate::error::ReorderError;

/// Parse the key column at `row`. `None` for blank or non-numeric text.
pub fn read_key_at<G: ScheduleGrid>(
    grid: &G,
    layout: &GridLayout,
    row: u32,
) -> Result<Option<CircuitKey>, ReorderError> {
    let col = layout.key_col;
    let text = grid
        .cell_text(row, col)
        .map_err(|e| ReorderError::GridRead {
            row,
            col,
            source: Box::new(e),
        })?;
    Ok(text.as_deref().and_then(CircuitKey::parse))
}

/// Whether the cell at `(row, col)` holds any content.
///
/// Occupancy within the scratch band is checked on the content column:
/// scratch rows carry raw content, not necessarily a registered key.
pub fn content_present<G: ScheduleGrid>(
    grid: &G,
    row: u32,
    col: u32,
) -> Result<bool, ReorderError> {
    let text = grid
        .cell_text(row, col)
        .map_err(|e| ReorderError::GridRead {
            row,
            col,
            source: Box::new(e),
        })?;
    Ok(text.is_some_and(|t| !t.is_empty()))
}

/// Relocate the slot at `(from_row, col)` to `(to_row, col)`.
pub fn move_slot<G: ScheduleGrid>(
    grid: &mut G,
    from_row: u32,
    to_row: u32,
    col: u32,
) -> Result<(), ReorderError> {
    grid.move_slot(from_row, col, to_row, col)
        .map_err(|e| ReorderError::MoveFailed {
            from_row,
            from_col: col,
            to_row,
            to_col: col,
            source: Box::new(e),
        })
}

/// Exchange the slots at `(row_a, col)` and `(row_b, col)`.
pub fn swap_slots<G: ScheduleGrid>(
    grid: &mut G,
    row_a: u32,
    row_b: u32,
    col: u32,
) -> Result<(), ReorderError> {
    grid.swap_slots(row_a, row_b, col)
        .map_err(|e| ReorderError::MoveFailed {
            from_row: row_a,
            from_col: col,
            to_row: row_b,
            to_col: col,
            source: Box::new(e),
        })
}
