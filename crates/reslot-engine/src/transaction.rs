//! Per-grid transaction wrapper.
//!
//! Hosts with native document transactions wrap the per-grid operation
//! themselves; this wrapper gives the same acquire / mutate /
//! commit-or-rollback shape to backends that have none. Writes go straight
//! through the wrapped grid so in-operation reads observe them; rollback
//! restores the cell baseline captured at `begin`.

use reslot_grid::ScheduleGrid;
use rustc_hash::FxHashMap;

use crate::error::ReorderError;

pub struct GridTransaction<'g, G: ScheduleGrid> {
    grid: &'g mut G,
    baseline: Vec<((u32, u32), String)>,
    committed: bool,
}

impl<'g, G: ScheduleGrid> GridTransaction<'g, G> {
    /// Capture the grid's occupied cells as the rollback baseline.
    pub fn begin(grid: &'g mut G) -> Result<Self, ReorderError> {
        let baseline = grid.cells().map_err(|e| ReorderError::Snapshot {
            source: Box::new(e),
        })?;
        Ok(Self {
            grid,
            baseline,
            committed: false,
        })
    }

    /// The wrapped grid; all mutation goes through it directly.
    pub fn grid(&mut self) -> &mut G {
        self.grid
    }

    /// Keep the mutations made since `begin`.
    pub fn commit(mut self) {
        self.committed = true;
    }

    fn roll_back(&mut self) {
        let current = match self.grid.cells() {
            Ok(cells) => cells,
            Err(e) => {
                tracing::error!(error = %e, "rollback aborted, cannot enumerate grid cells");
                return;
            }
        };
        let wanted: FxHashMap<(u32, u32), &String> =
            self.baseline.iter().map(|(coord, text)| (*coord, text)).collect();

        // Only touch cells that diverged from the baseline: untouched rows
        // (locked ones included) are never rewritten.
        for (coord, text) in &current {
            if wanted.get(coord).is_none_or(|orig| *orig != text)
                && let Err(e) = self.grid.clear_cell(coord.0, coord.1)
            {
                tracing::error!(row = coord.0, col = coord.1, error = %e, "rollback failed to clear cell");
            }
        }
        let current_map: FxHashMap<(u32, u32), String> = current.into_iter().collect();
        for (coord, text) in &self.baseline {
            if current_map.get(coord) != Some(text)
                && let Err(e) = self.grid.write_cell(coord.0, coord.1, text)
            {
                tracing::error!(row = coord.0, col = coord.1, error = %e, "rollback failed to restore cell");
            }
        }
    }
}

impl<G: ScheduleGrid> Drop for GridTransaction<'_, G> {
    fn drop(&mut self) {
        if !self.committed {
            self.roll_back();
        }
    }
}
