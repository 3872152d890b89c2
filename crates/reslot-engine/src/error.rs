use reslot_common::{CircuitKey, LayoutError};
use thiserror::Error;

/// Backend error as seen from the engine, with the backend type erased.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures that abort a per-grid operation.
///
/// Benign conditions are deliberately absent: an empty selection, an
/// unresolvable panel, scratch exhaustion, and boundary/absence skips are
/// summary or report states, not errors.
#[derive(Debug, Error)]
pub enum ReorderError {
    /// The grid rejected a slot relocation. Move-Down aborts the whole
    /// per-grid operation on this; Move-Up downgrades per-pair failures to
    /// skips and never surfaces it from a swap.
    #[error("slot move ({from_row}, {from_col}) -> ({to_row}, {to_col}) failed: {source}")]
    MoveFailed {
        from_row: u32,
        from_col: u32,
        to_row: u32,
        to_col: u32,
        #[source]
        source: BackendError,
    },

    #[error("grid read at ({row}, {col}) failed: {source}")]
    GridRead {
        row: u32,
        col: u32,
        #[source]
        source: BackendError,
    },

    #[error("grid snapshot failed: {source}")]
    Snapshot {
        #[source]
        source: BackendError,
    },

    /// Two rows carry the same key. The index refuses to guess which row
    /// is authoritative.
    #[error("rows {first_row} and {second_row} both carry circuit {key}")]
    CorruptIndex {
        key: CircuitKey,
        first_row: u32,
        second_row: u32,
    },

    #[error("invalid grid layout: {0}")]
    Layout(#[from] LayoutError),
}
