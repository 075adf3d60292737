//! Predecessor bookkeeping and path reconstruction.

use pathgrid_core::Point;

use crate::error::SearchError;

// ---------------------------------------------------------------------------
// PredecessorMap
// ---------------------------------------------------------------------------

/// Coordinate → coordinate relation recording, for each reached cell, the
/// cell it was reached from on its current best path.
#[derive(Debug, Clone)]
pub struct PredecessorMap {
    size: i32,
    parents: Vec<Option<Point>>,
}

impl PredecessorMap {
    /// An empty map over a `size × size` grid.
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        Self {
            size,
            parents: vec![None; (size as usize) * (size as usize)],
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.row < 0 || p.col < 0 || p.row >= self.size || p.col >= self.size {
            return None;
        }
        Some(p.row as usize * self.size as usize + p.col as usize)
    }

    /// The recorded predecessor of `p`.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Point> {
        self.idx(p).and_then(|i| self.parents[i])
    }

    /// Record `parent` as the predecessor of `p`. Out-of-range points are
    /// ignored.
    pub fn set(&mut self, p: Point, parent: Point) {
        if let Some(i) = self.idx(p) {
            self.parents[i] = Some(parent);
        }
    }

    /// Number of cells with a recorded predecessor.
    pub fn len(&self) -> usize {
        self.parents.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.iter().all(Option::is_none)
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// A shortest path, ordered from start to end with both endpoints included.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Point>,
}

impl Path {
    /// All cells, start first.
    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Number of moves (one less than the number of cells).
    #[inline]
    pub fn moves(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    /// Cells strictly between start and end.
    pub fn interior(&self) -> &[Point] {
        match self.cells.len() {
            0..=2 => &[],
            n => &self.cells[1..n - 1],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Walk `came_from` back from `end` to `start` and return the path in
/// start-to-end order.
///
/// Fails with [`SearchError::NoPath`] when the chain of predecessors does not
/// lead back to `start`, i.e. `end` was never reached.
pub fn reconstruct(
    came_from: &PredecessorMap,
    start: Point,
    end: Point,
) -> Result<Path, SearchError> {
    let mut cells = vec![end];
    let mut current = end;
    while let Some(prev) = came_from.get(current) {
        // A chain longer than the grid can only be a cycle.
        if cells.len() > came_from.parents.len() {
            return Err(SearchError::NoPath { end });
        }
        cells.push(prev);
        current = prev;
    }
    if current != start {
        return Err(SearchError::NoPath { end });
    }
    cells.reverse();
    Ok(Path { cells })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(size: i32, pts: &[Point]) -> PredecessorMap {
        let mut m = PredecessorMap::new(size);
        for w in pts.windows(2) {
            m.set(w[1], w[0]);
        }
        m
    }

    #[test]
    fn reconstruct_includes_both_endpoints() {
        let pts = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1), Point::new(2, 1)];
        let m = chain(3, &pts);
        let path = reconstruct(&m, pts[0], pts[3]).unwrap();
        assert_eq!(path.cells(), &pts);
        assert_eq!(path.moves(), 3);
        assert_eq!(path.start(), Some(pts[0]));
        assert_eq!(path.end(), Some(pts[3]));
        assert_eq!(path.interior(), &pts[1..3]);
    }

    #[test]
    fn start_equals_end() {
        let m = PredecessorMap::new(2);
        let p = Point::new(1, 1);
        let path = reconstruct(&m, p, p).unwrap();
        assert_eq!(path.cells(), &[p]);
        assert_eq!(path.moves(), 0);
        assert!(path.interior().is_empty());
    }

    #[test]
    fn unreached_end_is_no_path() {
        let m = chain(3, &[Point::new(0, 0), Point::new(0, 1)]);
        let end = Point::new(2, 2);
        assert_eq!(
            reconstruct(&m, Point::new(0, 0), end),
            Err(SearchError::NoPath { end })
        );
    }

    #[test]
    fn chain_to_wrong_root_is_no_path() {
        let m = chain(3, &[Point::new(0, 2), Point::new(1, 2), Point::new(2, 2)]);
        let end = Point::new(2, 2);
        assert_eq!(
            reconstruct(&m, Point::new(0, 0), end),
            Err(SearchError::NoPath { end })
        );
    }

    #[test]
    fn cycle_is_no_path() {
        let mut m = PredecessorMap::new(2);
        m.set(Point::new(0, 0), Point::new(0, 1));
        m.set(Point::new(0, 1), Point::new(0, 0));
        let end = Point::new(0, 1);
        assert_eq!(
            reconstruct(&m, Point::new(1, 1), end),
            Err(SearchError::NoPath { end })
        );
    }

    #[test]
    fn map_ignores_out_of_range() {
        let mut m = PredecessorMap::new(2);
        m.set(Point::new(5, 5), Point::new(0, 0));
        assert!(m.is_empty());
        assert_eq!(m.get(Point::new(-1, 0)), None);
        m.set(Point::new(1, 0), Point::new(0, 0));
        assert_eq!(m.len(), 1);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_round_trip() {
        let mut m = PredecessorMap::new(2);
        m.set(Point::new(0, 1), Point::new(0, 0));
        let path = reconstruct(&m, Point::new(0, 0), Point::new(0, 1)).unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
