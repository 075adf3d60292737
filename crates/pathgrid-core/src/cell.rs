//! The [`Cell`] type: one addressable square of the grid and its state.

use crate::geom::Point;

/// What a cell currently holds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    /// Not traversable.
    Barrier,
    Start,
    End,
}

impl CellState {
    /// Whether a search may step onto a cell in this state.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Barrier)
    }

    /// Whether this is the start or end marker.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// ASCII representation used by [`Grid::parse`](crate::Grid::parse).
    pub const fn to_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Barrier => '#',
            Self::Start => 'S',
            Self::End => 'E',
        }
    }

    /// Inverse of [`to_char`](Self::to_char).
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Empty),
            '#' => Some(Self::Barrier),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            _ => None,
        }
    }
}

/// A grid cell: its coordinate and state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub state: CellState,
}

impl Cell {
    /// A new empty cell at `pos`.
    #[inline]
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            state: CellState::Empty,
        }
    }

    /// Set the state (builder).
    #[inline]
    pub const fn with_state(mut self, state: CellState) -> Self {
        self.state = state;
        self
    }

    #[inline]
    pub const fn is_barrier(&self) -> bool {
        matches!(self.state, CellState::Barrier)
    }
}
