//! The host-grid boundary.
//!
//! A `ScheduleGrid` is whatever actually stores the schedule cells: the
//! in-memory reference backend, or an adapter over a host CAD document. The
//! engine only ever talks to this trait.

/// Cell-addressed access to one schedule grid.
///
/// `move_slot` and `swap_slots` have default implementations composed from
/// the cell primitives. They move single cells; backends that model a keyed
/// schedule override them so a slot's key cell travels with its content
/// (see `MemoryGrid`), the way a host schedule keeps its number column in
/// step with the circuit slots.
pub trait ScheduleGrid {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Text of the cell at `(row, col)`, `None` when the cell is empty.
    fn cell_text(&self, row: u32, col: u32) -> Result<Option<String>, Self::Error>;

    fn write_cell(&mut self, row: u32, col: u32, text: &str) -> Result<(), Self::Error>;

    fn clear_cell(&mut self, row: u32, col: u32) -> Result<(), Self::Error>;

    /// Every non-empty cell in the grid.
    ///
    /// Used by the transaction wrapper to capture a rollback baseline, the
    /// same way a sheet backend exposes a full dump next to cell access.
    fn cells(&self) -> Result<Vec<((u32, u32), String)>, Self::Error>;

    /// Relocate the value at the source cell to the destination cell,
    /// clearing the source. The destination's previous content is
    /// overwritten; callers guarantee it was empty or already relocated.
    ///
    /// On failure the grid may be left mid-move; callers run slot moves
    /// inside a transaction and abort the operation on the first error.
    fn move_slot(
        &mut self,
        from_row: u32,
        from_col: u32,
        to_row: u32,
        to_col: u32,
    ) -> Result<(), Self::Error> {
        match self.cell_text(from_row, from_col)? {
            Some(text) => self.write_cell(to_row, to_col, &text)?,
            None => self.clear_cell(to_row, to_col)?,
        }
        self.clear_cell(from_row, from_col)
    }

    /// Exchange the contents of two cells in one column.
    fn swap_slots(&mut self, row_a: u32, row_b: u32, col: u32) -> Result<(), Self::Error> {
        let a = self.cell_text(row_a, col)?;
        let b = self.cell_text(row_b, col)?;
        match b {
            Some(text) => self.write_cell(row_a, col, &text)?,
            None => self.clear_cell(row_a, col)?,
        }
        match a {
            Some(text) => self.write_cell(row_b, col, &text)?,
            None => self.clear_cell(row_b, col)?,
        }
        Ok(())
    }
}
