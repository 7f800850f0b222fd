//! Invariant violations inside the engine.
//!
//! Game outcomes (collisions, a full board, the countdown running out) are
//! state transitions, not errors. These variants only describe calls that
//! would otherwise write outside the grid or read outside a shape.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A board coordinate outside the `BOARD_W` × `BOARD_H` grid.
    OutOfBounds { x: i32, y: i32 },
    /// A shape cell outside the shape's own rows/columns.
    ShapeIndex { row: usize, col: usize },
    /// A difficulty name other than `Easy`, `Med` or `Hard`.
    UnknownDifficulty,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { x, y } => write!(f, "cell ({x}, {y}) is outside the board"),
            Self::ShapeIndex { row, col } => write!(f, "shape has no cell at row {row}, column {col}"),
            Self::UnknownDifficulty => f.write_str("unknown difficulty name"),
        }
    }
}

impl core::error::Error for Error {}
