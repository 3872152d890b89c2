//! The two reorder strategies.
//!
//! [`MoveDown`] shifts each selected record one row down, resolving
//! destination collisions with a three-step rotation through a scratch row,
//! and fails the whole grid on the first rejected move. [`MoveUp`] is a
//! bubble compaction that swaps adjacent pairs until fixpoint and skips
//! rejected pairs. The rotation/bubble and abort/skip asymmetries are
//! inherited behavior, kept observable on purpose.

mod down;
mod up;

pub use down::MoveDown;
pub use up::MoveUp;

use reslot_common::{CircuitKey, GridLayout};
use reslot_grid::ScheduleGrid;

use crate::error::ReorderError;
use crate::report::ReorderReport;

/// One reorder strategy over one grid.
///
/// `selection` is the externally-resolved set of keys to move; duplicates
/// are tolerated and keys absent from the grid are reported, not erred.
pub trait ReorderPlanner {
    fn reorder<G: ScheduleGrid>(
        &self,
        grid: &mut G,
        layout: &GridLayout,
        selection: &[CircuitKey],
    ) -> Result<ReorderReport, ReorderError>;
}

/// Sorted, deduplicated copy of the selection, for deterministic reports.
pub(crate) fn normalized_selection(selection: &[CircuitKey]) -> Vec<CircuitKey> {
    let mut keys = selection.to_vec();
    keys.sort_unstable();
    keys.dedup();
    keys
}
