//! Error types for maze loading and model extraction

use thiserror::Error;

/// Errors raised while building a maze or reading back a solver model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze source is empty")]
    Empty,
    #[error("invalid maze size line {0:?}")]
    InvalidSize(String),
    #[error("maze size must be positive")]
    ZeroSize,
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has length {found}, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },
    #[error("start cell (0, 0) is blocked")]
    BlockedStart,
    /// A model value was requested before the solver reported a satisfying assignment.
    #[error("no model available: the last solve call did not succeed")]
    NoModel,
}
