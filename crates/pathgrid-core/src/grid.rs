//! The [`Grid`] type: an `N × N` arena of [`Cell`]s addressed by coordinate.
//!
//! The grid tracks where its start and end markers are so that lookups and the
//! at-most-one invariant are cheap to maintain.

use crate::cell::{Cell, CellState};
use crate::error::GridError;
use crate::geom::{Point, Points};

/// A square grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: i32,
    cells: Vec<Cell>,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Create a `size × size` grid with every cell [`CellState::Empty`].
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        Self {
            size,
            cells: Points::new(size).map(Cell::new).collect(),
            start: None,
            end: None,
        }
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies on the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.size && p.col < self.size
    }

    /// Flat index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.size as usize + p.col as usize)
    }

    /// Coordinate of a flat index. Inverse of [`index`](Self::index).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let n = self.size.max(1) as usize;
        Point::new((idx / n) as i32, (idx % n) as i32)
    }

    #[inline]
    fn checked_index(&self, p: Point) -> Result<usize, GridError> {
        self.index(p).ok_or(GridError::OutOfBounds {
            pos: p,
            size: self.size,
        })
    }

    /// The cell at `p`.
    pub fn cell(&self, p: Point) -> Result<&Cell, GridError> {
        let i = self.checked_index(p)?;
        Ok(&self.cells[i])
    }

    /// The state of the cell at `p`.
    pub fn state(&self, p: Point) -> Result<CellState, GridError> {
        self.cell(p).map(|c| c.state)
    }

    /// Current start marker, if placed.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Current end marker, if placed.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Set the state of the cell at `p`.
    ///
    /// Placing a start (or end) clears the previous one, so at most one of
    /// each exists. Overwriting an endpoint with another state releases it.
    pub fn set_state(&mut self, p: Point, state: CellState) -> Result<(), GridError> {
        let i = self.checked_index(p)?;

        match self.cells[i].state {
            CellState::Start if state != CellState::Start => self.start = None,
            CellState::End if state != CellState::End => self.end = None,
            _ => {}
        }

        match state {
            CellState::Start => {
                if let Some(old) = self.start.replace(p).filter(|&old| old != p) {
                    self.clear_slot(old);
                }
            }
            CellState::End => {
                if let Some(old) = self.end.replace(p).filter(|&old| old != p) {
                    self.clear_slot(old);
                }
            }
            _ => {}
        }

        self.cells[i].state = state;
        Ok(())
    }

    fn clear_slot(&mut self, p: Point) {
        if let Some(j) = self.index(p) {
            self.cells[j].state = CellState::Empty;
        }
    }

    /// Reset a single cell to [`CellState::Empty`].
    pub fn reset(&mut self, p: Point) -> Result<(), GridError> {
        self.set_state(p, CellState::Empty)
    }

    /// A fresh grid of the same size with every cell empty.
    pub fn reset_all(&self) -> Grid {
        Grid::new(self.size)
    }

    /// Append the passable cardinal neighbours of `p` to `buf`, in the order
    /// down, up, right, left. The caller clears `buf` before calling.
    pub fn neighbors_into(&self, p: Point, buf: &mut Vec<Point>) -> Result<(), GridError> {
        self.checked_index(p)?;
        for n in p.neighbors_4() {
            if let Some(j) = self.index(n) {
                if self.cells[j].state.is_passable() {
                    buf.push(n);
                }
            }
        }
        Ok(())
    }

    /// Passable cardinal neighbours of `p` (down, up, right, left).
    pub fn neighbors(&self, p: Point) -> Result<Vec<Point>, GridError> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors_into(p, &mut buf)?;
        Ok(buf)
    }

    /// Row-major iterator over all cells.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Row-major iterator over all coordinates.
    pub fn points(&self) -> Points {
        Points::new(self.size)
    }

    /// Number of barrier cells.
    pub fn barrier_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_barrier()).count()
    }

    // -----------------------------------------------------------------------
    // ASCII layouts
    // -----------------------------------------------------------------------

    /// Parse a square ASCII layout: `.` empty, `#` barrier, `S` start,
    /// `E` end. Surrounding whitespace on each line and blank lines are
    /// ignored.
    pub fn parse(text: &str) -> Result<Grid, GridError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let size = lines.len();
        if lines.iter().any(|l| l.chars().count() != size) {
            return Err(GridError::InconsistentSize(text.to_string()));
        }

        let mut grid = Grid::new(size as i32);
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let pos = Point::new(row as i32, col as i32);
                let state = CellState::from_char(ch).ok_or(GridError::InvalidRune { ch, pos })?;
                let taken = match state {
                    CellState::Start => grid.start.is_some(),
                    CellState::End => grid.end.is_some(),
                    _ => false,
                };
                if taken {
                    return Err(GridError::DuplicateEndpoint { state, pos });
                }
                grid.set_state(pos, state)?;
            }
        }
        Ok(grid)
    }

    /// Render as an ASCII layout accepted by [`parse`](Self::parse).
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.size as usize);
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % self.size as usize == 0 {
                out.push('\n');
            }
            out.push(cell.state.to_char());
        }
        out
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.render_ascii().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let layout = String::deserialize(deserializer)?;
        Grid::parse(&layout).map_err(serde::de::Error::custom)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::parse("S.#\n.#.\n..E").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "\"S.#\\n.#.\\n..E\"");
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn point_and_state_round_trip() {
        let cell = Cell::new(Point::new(2, 3)).with_state(CellState::Barrier);
        let json = serde_json::to_string(&cell).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);
    }
}
