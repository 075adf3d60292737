//! Geometry primitives: [`Point`] and the row-major [`Points`] iterator.
//!
//! Coordinates are `(row, col)` with rows growing downwards, matching how the
//! grid is laid out on screen.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A cell coordinate on the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// One step down.
    pub const DOWN: Self = Self { row: 1, col: 0 };
    /// One step up.
    pub const UP: Self = Self { row: -1, col: 0 };
    /// One step right.
    pub const RIGHT: Self = Self { row: 0, col: 1 };
    /// One step left.
    pub const LEFT: Self = Self { row: 0, col: -1 };

    /// Cardinal directions in neighbor enumeration order.
    pub const CARDINALS: [Self; 4] = [Self::DOWN, Self::UP, Self::RIGHT, Self::LEFT];

    /// Create a new point.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a point shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four cardinal neighbours in fixed order: down, up, right, left.
    ///
    /// Bounds are not checked.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        Self::CARDINALS.map(|d| self + d)
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

/// Row-major iterator over every coordinate of a square `size × size` area.
#[derive(Clone, Debug)]
pub struct Points {
    size: i32,
    cur: Point,
}

impl Points {
    pub(crate) fn new(size: i32) -> Self {
        Self {
            size: size.max(0),
            cur: Point::ZERO,
        }
    }
}

impl Iterator for Points {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.cur.row >= self.size || self.size == 0 {
            return None;
        }
        let p = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.size {
            self.cur.col = 0;
            self.cur.row += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.size == 0 || self.cur.row >= self.size {
            return (0, Some(0));
        }
        let n = self.size as usize;
        let remaining_in_row = (self.size - self.cur.col) as usize;
        let remaining_rows = (self.size - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * n;
        (total, Some(total))
    }
}

impl ExactSizeIterator for Points {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1, 2);
        let b = Point::new(3, 4);
        assert_eq!(a + b, Point::new(4, 6));
        assert_eq!(b - a, Point::new(2, 2));
        assert_eq!(a.shift(-1, 1), Point::new(0, 3));
    }

    #[test]
    fn neighbors_order_is_down_up_right_left() {
        let n = Point::new(2, 2).neighbors_4();
        assert_eq!(
            n,
            [
                Point::new(3, 2),
                Point::new(1, 2),
                Point::new(2, 3),
                Point::new(2, 1),
            ]
        );
    }

    #[test]
    fn ordering_is_row_major() {
        let mut pts = vec![Point::new(1, 0), Point::new(0, 2), Point::new(0, 1)];
        pts.sort();
        assert_eq!(pts, vec![Point::new(0, 1), Point::new(0, 2), Point::new(1, 0)]);
    }

    #[test]
    fn points_iter_row_major() {
        let pts: Vec<_> = Points::new(2).collect();
        assert_eq!(
            pts,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(1, 1),
            ]
        );
    }

    #[test]
    fn points_size_hint_tracks_progress() {
        let mut it = Points::new(3);
        assert_eq!(it.len(), 9);
        it.next();
        it.next();
        assert_eq!(it.len(), 7);
        assert_eq!(Points::new(0).len(), 0);
        assert_eq!(Points::new(0).count(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(Point::new(4, 7).to_string(), "(4, 7)");
    }
}
