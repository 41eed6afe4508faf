use thiserror::Error;

use crate::{Point, Range};

/// Errors raised while building or addressing a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Map rows have different widths.
    #[error("map row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character with no terrain meaning.
    #[error("unknown map glyph {ch:?} at {pos}")]
    UnknownGlyph { ch: char, pos: Point },
    /// The map text has no cells.
    #[error("map is empty")]
    Empty,
    /// A coordinate outside the grid extent.
    #[error("{pos} is outside the grid {range}")]
    OutOfBounds { pos: Point, range: Range },
}
