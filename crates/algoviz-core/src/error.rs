//! Error type for invalid configuration.
//!
//! All variants describe input rejected *before* any steps are generated;
//! a run never fails mid-sequence. "No path exists" is not an error, it is
//! a normal terminal step.

use crate::pos::Pos;

/// Invalid-configuration errors raised at the point of step generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Grid dimensions must both be at least 1.
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyGrid { rows: i32, cols: i32 },

    /// A start/goal position lies outside the grid.
    #[error("position {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds { pos: Pos, rows: i32, cols: i32 },

    /// A start/goal position sits on a wall cell.
    #[error("position {pos} is a wall")]
    WallEndpoint { pos: Pos },

    /// Sorting input was empty.
    #[error("input array is empty")]
    EmptyInput,

    /// A tree node id appears more than once.
    #[error("tree contains duplicate node id {id}")]
    MalformedTree { id: usize },

    /// A generator produced a sequence violating the init/terminal
    /// envelope. Indicates a bug in the generator, surfaced fast.
    #[error("malformed step sequence: {reason}")]
    MalformedSequence { reason: &'static str },
}
