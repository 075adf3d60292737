use std::fmt;

use crate::cell::CellState;
use crate::geom::Point;

/// Errors raised by [`Grid`](crate::Grid) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate outside `[0, size)` on either axis.
    OutOfBounds { pos: Point, size: i32 },
    /// A parsed layout is not square or has ragged lines.
    InconsistentSize(String),
    /// A character not in the layout alphabet was found.
    InvalidRune { ch: char, pos: Point },
    /// A parsed layout marks more than one start or end.
    DuplicateEndpoint { state: CellState, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, size } => {
                write!(f, "grid: {pos} is outside a {size}x{size} grid")
            }
            Self::InconsistentSize(s) => write!(f, "grid: inconsistent size:\n{s}"),
            Self::InvalidRune { ch, pos } => {
                write!(f, "grid: invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateEndpoint { state, pos } => {
                write!(f, "grid: second {state:?} marker at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
