//! Bounds-checked in-memory backend.
//!
//! `MemoryGrid` is the reference `ScheduleGrid`: a sparse cell store with
//! per-row locks so tests can provoke move failures, and (feature `json`) a
//! versioned JSON snapshot format. Constructed via `for_layout`, it pairs
//! the key column to the content column: a slot move or swap on the content
//! column carries the row's key cell along, matching the host schedule
//! behavior the engine was built against.

use std::collections::BTreeMap;

use reslot_common::{CircuitKey, GridLayout};
use rustc_hash::FxHashSet;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "json")]
use std::path::Path;

use crate::error::GridError;
use crate::traits::ScheduleGrid;

pub struct MemoryGrid {
    cells: BTreeMap<(u32, u32), String>,
    row_count: u32,
    locked: FxHashSet<u32>,
    /// `(key_col, content_col)` when slot moves on the content column carry
    /// the key cell along.
    slot_pair: Option<(u32, u32)>,
}

impl MemoryGrid {
    /// A grid of `row_count` rows with no column pairing.
    pub fn new(row_count: u32) -> Self {
        Self {
            cells: BTreeMap::new(),
            row_count,
            locked: FxHashSet::default(),
            slot_pair: None,
        }
    }

    /// A grid sized for `layout` (header through scratch band) whose content
    /// column carries the key column on slot moves.
    pub fn for_layout(layout: &GridLayout) -> Self {
        Self {
            cells: BTreeMap::new(),
            row_count: layout.scratch_end + 1,
            locked: FxHashSet::default(),
            slot_pair: Some((layout.key_col, layout.content_col)),
        }
    }

    /// Place a circuit on `row`: key text in the key column, `content` in
    /// the content column.
    pub fn seed_circuit(
        &mut self,
        layout: &GridLayout,
        row: u32,
        key: CircuitKey,
        content: &str,
    ) -> Result<(), GridError> {
        self.write_cell(row, layout.key_col, &key.to_string())?;
        self.write_cell(row, layout.content_col, content)
    }

    /// Reject writes and slot moves touching `row` until unlocked.
    pub fn lock_row(&mut self, row: u32) {
        self.locked.insert(row);
    }

    pub fn unlock_row(&mut self, row: u32) {
        self.locked.remove(&row);
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn check_read(&self, row: u32, col: u32) -> Result<(), GridError> {
        if row >= self.row_count {
            return Err(GridError::OutOfBounds { row, col });
        }
        Ok(())
    }

    fn check_write(&self, row: u32, col: u32) -> Result<(), GridError> {
        self.check_read(row, col)?;
        if self.locked.contains(&row) {
            return Err(GridError::RowLocked(row));
        }
        Ok(())
    }

    fn move_one(
        &mut self,
        from_row: u32,
        from_col: u32,
        to_row: u32,
        to_col: u32,
    ) -> Result<(), GridError> {
        self.check_write(from_row, from_col)?;
        self.check_write(to_row, to_col)?;
        match self.cells.remove(&(from_row, from_col)) {
            Some(text) => {
                self.cells.insert((to_row, to_col), text);
            }
            None => {
                self.cells.remove(&(to_row, to_col));
            }
        }
        Ok(())
    }

    fn swap_one(&mut self, row_a: u32, row_b: u32, col: u32) -> Result<(), GridError> {
        self.check_write(row_a, col)?;
        self.check_write(row_b, col)?;
        let a = self.cells.remove(&(row_a, col));
        let b = self.cells.remove(&(row_b, col));
        if let Some(text) = a {
            self.cells.insert((row_b, col), text);
        }
        if let Some(text) = b {
            self.cells.insert((row_a, col), text);
        }
        Ok(())
    }
}

impl ScheduleGrid for MemoryGrid {
    type Error = GridError;

    fn cell_text(&self, row: u32, col: u32) -> Result<Option<String>, GridError> {
        self.check_read(row, col)?;
        Ok(self.cells.get(&(row, col)).cloned())
    }

    fn write_cell(&mut self, row: u32, col: u32, text: &str) -> Result<(), GridError> {
        self.check_write(row, col)?;
        if text.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), text.to_string());
        }
        Ok(())
    }

    fn clear_cell(&mut self, row: u32, col: u32) -> Result<(), GridError> {
        self.check_write(row, col)?;
        self.cells.remove(&(row, col));
        Ok(())
    }

    fn cells(&self) -> Result<Vec<((u32, u32), String)>, GridError> {
        Ok(self
            .cells
            .iter()
            .map(|(&coord, text)| (coord, text.clone()))
            .collect())
    }

    fn move_slot(
        &mut self,
        from_row: u32,
        from_col: u32,
        to_row: u32,
        to_col: u32,
    ) -> Result<(), GridError> {
        self.move_one(from_row, from_col, to_row, to_col)?;
        if let Some((key_col, content_col)) = self.slot_pair
            && from_col == content_col
            && to_col == content_col
        {
            // Locks and bounds are per-row, so the paired key move cannot
            // fail after the content move succeeded.
            self.move_one(from_row, key_col, to_row, key_col)?;
        }
        Ok(())
    }

    fn swap_slots(&mut self, row_a: u32, row_b: u32, col: u32) -> Result<(), GridError> {
        self.swap_one(row_a, row_b, col)?;
        if let Some((key_col, content_col)) = self.slot_pair
            && col == content_col
        {
            self.swap_one(row_a, row_b, key_col)?;
        }
        Ok(())
    }
}

/* ───────────────────────── JSON snapshot ────────────────────────── */

// Locks are runtime state; snapshots do not carry them.

#[cfg(feature = "json")]
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
struct GridSnapshot {
    #[serde(default = "default_version")]
    version: u32,
    row_count: u32,
    #[serde(default)]
    slot_pair: Option<(u32, u32)>,
    #[serde(default)]
    cells: Vec<SnapshotCell>,
}

#[cfg(feature = "json")]
fn default_version() -> u32 {
    1
}

#[cfg(feature = "json")]
#[derive(Serialize, Deserialize, Debug, Clone)]
struct SnapshotCell {
    row: u32,
    col: u32,
    text: String,
}

#[cfg(feature = "json")]
impl MemoryGrid {
    fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            version: default_version(),
            row_count: self.row_count,
            slot_pair: self.slot_pair,
            cells: self
                .cells
                .iter()
                .map(|(&(row, col), text)| SnapshotCell {
                    row,
                    col,
                    text: text.clone(),
                })
                .collect(),
        }
    }

    fn from_snapshot(snapshot: GridSnapshot) -> Self {
        let mut grid = Self::new(snapshot.row_count);
        grid.slot_pair = snapshot.slot_pair;
        for cell in snapshot.cells {
            if !cell.text.is_empty() {
                grid.cells.insert((cell.row, cell.col), cell.text);
            }
        }
        grid
    }

    pub fn to_json_string(&self) -> Result<String, GridError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, GridError> {
        let snapshot: GridSnapshot = serde_json::from_str(text)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, GridError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), GridError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        GridLayout {
            first_data_row: 2,
            key_col: 1,
            content_col: 2,
            scratch_start: 8,
            scratch_end: 10,
        }
    }

    #[test]
    fn reads_out_of_bounds_are_rejected() {
        let grid = MemoryGrid::new(5);
        assert!(matches!(
            grid.cell_text(5, 1),
            Err(GridError::OutOfBounds { row: 5, col: 1 })
        ));
    }

    #[test]
    fn locked_rows_reject_writes_but_not_reads() {
        let mut grid = MemoryGrid::new(5);
        grid.write_cell(2, 1, "12").unwrap();
        grid.lock_row(2);
        assert!(matches!(
            grid.write_cell(2, 1, "13"),
            Err(GridError::RowLocked(2))
        ));
        assert_eq!(grid.cell_text(2, 1).unwrap().as_deref(), Some("12"));
        grid.unlock_row(2);
        grid.write_cell(2, 1, "13").unwrap();
    }

    #[test]
    fn writing_empty_text_clears_the_cell() {
        let mut grid = MemoryGrid::new(5);
        grid.write_cell(2, 1, "12").unwrap();
        grid.write_cell(2, 1, "").unwrap();
        assert_eq!(grid.cell_text(2, 1).unwrap(), None);
        assert_eq!(grid.cell_count(), 0);
    }

    #[test]
    fn move_slot_clears_the_source() {
        let mut grid = MemoryGrid::new(5);
        grid.write_cell(2, 2, "lighting").unwrap();
        grid.move_slot(2, 2, 3, 2).unwrap();
        assert_eq!(grid.cell_text(2, 2).unwrap(), None);
        assert_eq!(grid.cell_text(3, 2).unwrap().as_deref(), Some("lighting"));
    }

    #[test]
    fn move_slot_from_empty_source_empties_the_destination() {
        let mut grid = MemoryGrid::new(5);
        grid.write_cell(3, 2, "stale").unwrap();
        grid.move_slot(2, 2, 3, 2).unwrap();
        assert_eq!(grid.cell_text(3, 2).unwrap(), None);
    }

    #[test]
    fn paired_move_carries_the_key_cell() {
        let layout = layout();
        let mut grid = MemoryGrid::for_layout(&layout);
        grid.seed_circuit(&layout, 2, CircuitKey::new(12), "lighting")
            .unwrap();
        grid.move_slot(2, layout.content_col, 3, layout.content_col)
            .unwrap();
        assert_eq!(grid.cell_text(2, layout.key_col).unwrap(), None);
        assert_eq!(grid.cell_text(2, layout.content_col).unwrap(), None);
        assert_eq!(grid.cell_text(3, layout.key_col).unwrap().as_deref(), Some("12"));
        assert_eq!(
            grid.cell_text(3, layout.content_col).unwrap().as_deref(),
            Some("lighting")
        );
    }

    #[test]
    fn unpaired_columns_move_alone() {
        let layout = layout();
        let mut grid = MemoryGrid::for_layout(&layout);
        grid.seed_circuit(&layout, 2, CircuitKey::new(12), "lighting")
            .unwrap();
        grid.write_cell(2, 5, "note").unwrap();
        grid.move_slot(2, 5, 3, 5).unwrap();
        assert_eq!(grid.cell_text(2, layout.key_col).unwrap().as_deref(), Some("12"));
        assert_eq!(grid.cell_text(3, 5).unwrap().as_deref(), Some("note"));
    }

    #[test]
    fn paired_swap_exchanges_both_columns() {
        let layout = layout();
        let mut grid = MemoryGrid::for_layout(&layout);
        grid.seed_circuit(&layout, 2, CircuitKey::new(10), "a").unwrap();
        grid.seed_circuit(&layout, 3, CircuitKey::new(11), "b").unwrap();
        grid.swap_slots(2, 3, layout.content_col).unwrap();
        assert_eq!(grid.cell_text(2, layout.key_col).unwrap().as_deref(), Some("11"));
        assert_eq!(grid.cell_text(2, layout.content_col).unwrap().as_deref(), Some("b"));
        assert_eq!(grid.cell_text(3, layout.key_col).unwrap().as_deref(), Some("10"));
        assert_eq!(grid.cell_text(3, layout.content_col).unwrap().as_deref(), Some("a"));
    }

    #[test]
    fn move_to_locked_row_leaves_the_grid_unchanged() {
        let mut grid = MemoryGrid::new(5);
        grid.write_cell(2, 2, "payload").unwrap();
        grid.lock_row(3);
        assert!(matches!(
            grid.move_slot(2, 2, 3, 2),
            Err(GridError::RowLocked(3))
        ));
        assert_eq!(grid.cell_text(2, 2).unwrap().as_deref(), Some("payload"));
        assert_eq!(grid.cell_text(3, 2).unwrap(), None);
    }
}
