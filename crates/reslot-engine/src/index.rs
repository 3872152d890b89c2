//! Row bookkeeping for one reorder operation.
//!
//! Both structures are rebuilt from live cells on every planner invocation
//! and never survive it; a grid's row-to-key mapping is not a cache. Two rows
//! reporting the same key is a corrupt grid and surfaces as
//! [`ReorderError::CorruptIndex`] instead of being silently resolved.

use core::ops::Range;

use reslot_common::{CircuitKey, GridLayout};
use reslot_grid::ScheduleGrid;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::accessor::read_key_at;
use crate::error::ReorderError;

/// key → current row for every keyed row in a scanned range.
#[derive(Debug, Default)]
pub struct RowIndex {
    by_key: FxHashMap<CircuitKey, u32>,
}

impl RowIndex {
    /// Scan `rows` once, recording every parseable key.
    pub fn build<G: ScheduleGrid>(
        grid: &G,
        layout: &GridLayout,
        rows: Range<u32>,
    ) -> Result<Self, ReorderError> {
        let mut by_key = FxHashMap::default();
        for row in rows {
            if let Some(key) = read_key_at(grid, layout, row)?
                && let Some(first_row) = by_key.insert(key, row)
            {
                return Err(ReorderError::CorruptIndex {
                    key,
                    first_row,
                    second_row: row,
                });
            }
        }
        Ok(Self { by_key })
    }

    pub fn row_of(&self, key: CircuitKey) -> Option<u32> {
        self.by_key.get(&key).copied()
    }

    /// Record that `key` now occupies `row`.
    pub fn record_move(&mut self, key: CircuitKey, row: u32) {
        self.by_key.insert(key, row);
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// One occupied visible row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowEntry {
    pub row: u32,
    pub key: CircuitKey,
    pub selected: bool,
}

/// Every occupied visible row in ascending row order, with selection marks.
///
/// The bubble loop's single source of truth: physical row numbers stay
/// attached to list positions and `swap_occupants` exchanges which keys sit
/// on them, so the loop never depends on re-reading the grid mid-pass.
#[derive(Debug, Default)]
pub struct OccupiedRows {
    entries: Vec<RowEntry>,
}

impl OccupiedRows {
    /// Scan the visible range and mark entries whose key is in `selection`.
    pub fn scan<G: ScheduleGrid>(
        grid: &G,
        layout: &GridLayout,
        selection: &[CircuitKey],
    ) -> Result<Self, ReorderError> {
        let selected: FxHashSet<CircuitKey> = selection.iter().copied().collect();
        let mut seen: FxHashMap<CircuitKey, u32> = FxHashMap::default();
        let mut entries = Vec::new();
        for row in layout.visible_rows() {
            if let Some(key) = read_key_at(grid, layout, row)? {
                if let Some(first_row) = seen.insert(key, row) {
                    return Err(ReorderError::CorruptIndex {
                        key,
                        first_row,
                        second_row: row,
                    });
                }
                entries.push(RowEntry {
                    row,
                    key,
                    selected: selected.contains(&key),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RowEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exchange the occupants of positions `i - 1` and `i`; the physical
    /// rows stay attached to their positions.
    pub fn swap_occupants(&mut self, i: usize) {
        let row_above = self.entries[i - 1].row;
        let row_here = self.entries[i].row;
        self.entries.swap(i - 1, i);
        self.entries[i - 1].row = row_above;
        self.entries[i].row = row_here;
    }
}
