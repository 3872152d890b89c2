use thiserror::Error;

/// Errors from the in-memory reference backend.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: u32, col: u32 },

    #[error("row {0} is locked")]
    RowLocked(u32),

    #[cfg(feature = "json")]
    #[error("grid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[cfg(feature = "json")]
    #[error("grid snapshot i/o: {0}")]
    Io(#[from] std::io::Error),
}
