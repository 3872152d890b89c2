//! Row and column constants for one schedule grid.
//!
//! Rows 0 and 1 of a panel schedule are header rows; circuit data occupies
//! `first_data_row..scratch_start`. The scratch band `scratch_start..=
//! scratch_end` sits above the visible numbering and is reserved as holding
//! space for conflict-resolving moves; it must be empty between operations.
//! The defaults preserve the schedule shape this engine was built against;
//! hosts with a different sheet shape pass their own layout.

use core::fmt;
use core::ops::{Range, RangeInclusive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors returned when validating a layout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LayoutError {
    ScratchBelowVisible {
        scratch_start: u32,
        first_data_row: u32,
    },
    ScratchInverted {
        scratch_start: u32,
        scratch_end: u32,
    },
    ColumnClash(u32),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::ScratchBelowVisible {
                scratch_start,
                first_data_row,
            } => write!(
                f,
                "scratch band starting at row {scratch_start} must sit above the data rows starting at {first_data_row}"
            ),
            LayoutError::ScratchInverted {
                scratch_start,
                scratch_end,
            } => write!(
                f,
                "scratch band {scratch_start}..={scratch_end} is inverted"
            ),
            LayoutError::ColumnClash(col) => {
                write!(f, "key and content columns are both {col}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Row/column addressing for one schedule grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct GridLayout {
    /// First row holding circuit data (rows above it are header).
    pub first_data_row: u32,
    /// Column holding the circuit key as text.
    pub key_col: u32,
    /// Column holding the circuit's content block.
    pub content_col: u32,
    /// First row of the scratch band.
    pub scratch_start: u32,
    /// Last row of the scratch band, inclusive.
    pub scratch_end: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            first_data_row: 2,
            key_col: 1,
            content_col: 2,
            scratch_start: 350,
            scratch_end: 400,
        }
    }
}

impl GridLayout {
    /// The rows that may carry visible circuit data.
    ///
    /// Stops at `scratch_start`: the scratch band is outside the visible
    /// numbering even though the host sheet addresses it with the same row
    /// space.
    pub fn visible_rows(&self) -> Range<u32> {
        self.first_data_row..self.scratch_start
    }

    /// The reserved holding-space rows, ascending.
    pub fn scratch_rows(&self) -> RangeInclusive<u32> {
        self.scratch_start..=self.scratch_end
    }

    pub fn last_visible_row(&self) -> u32 {
        self.scratch_start - 1
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.scratch_start <= self.first_data_row {
            return Err(LayoutError::ScratchBelowVisible {
                scratch_start: self.scratch_start,
                first_data_row: self.first_data_row,
            });
        }
        if self.scratch_end < self.scratch_start {
            return Err(LayoutError::ScratchInverted {
                scratch_start: self.scratch_start,
                scratch_end: self.scratch_end,
            });
        }
        if self.key_col == self.content_col {
            return Err(LayoutError::ColumnClash(self.key_col));
        }
        Ok(())
    }
}
