//! Click-driven editing of a [`Grid`].
//!
//! The primary action places the start first, then the end, then barriers.
//! The secondary action erases whatever is under the cursor.

use rand::{Rng, RngExt};

use crate::cell::CellState;
use crate::error::GridError;
use crate::geom::Point;
use crate::grid::Grid;

impl Grid {
    /// Apply the primary (paint) action at `p`.
    ///
    /// Returns the state written, or `None` when the click did nothing
    /// (painting over the start or end marker).
    pub fn paint(&mut self, p: Point) -> Result<Option<CellState>, GridError> {
        let current = self.state(p)?;
        let target = if self.start().is_none() && current != CellState::End {
            CellState::Start
        } else if self.end().is_none() && current != CellState::Start {
            CellState::End
        } else if !current.is_endpoint() {
            CellState::Barrier
        } else {
            return Ok(None);
        };

        if target == current {
            return Ok(None);
        }
        self.set_state(p, target)?;
        log::trace!("paint {p} -> {target:?}");
        Ok(Some(target))
    }

    /// Apply the secondary (erase) action at `p`, releasing start/end.
    ///
    /// Returns the state that was removed, if the cell was not already empty.
    pub fn erase(&mut self, p: Point) -> Result<Option<CellState>, GridError> {
        let current = self.state(p)?;
        if current == CellState::Empty {
            return Ok(None);
        }
        self.reset(p)?;
        log::trace!("erase {p} ({current:?})");
        Ok(Some(current))
    }

    /// Turn each empty cell into a barrier with probability `density`.
    ///
    /// Start and end markers are left alone. Returns the number of barriers
    /// added.
    pub fn scatter_barriers(&mut self, rng: &mut impl Rng, density: f64) -> usize {
        let mut added = 0;
        for p in self.points() {
            if self.state(p) != Ok(CellState::Empty) {
                continue;
            }
            let r: f64 = rng.random();
            if r < density && self.set_state(p, CellState::Barrier).is_ok() {
                added += 1;
            }
        }
        log::debug!("scattered {added} barriers at density {density:.2}");
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn paint_places_start_then_end_then_barriers() {
        let mut g = Grid::new(3);
        assert_eq!(g.paint(Point::new(0, 0)).unwrap(), Some(CellState::Start));
        assert_eq!(g.paint(Point::new(2, 2)).unwrap(), Some(CellState::End));
        assert_eq!(g.paint(Point::new(1, 1)).unwrap(), Some(CellState::Barrier));
        assert_eq!(g.start(), Some(Point::new(0, 0)));
        assert_eq!(g.end(), Some(Point::new(2, 2)));
    }

    #[test]
    fn paint_never_overwrites_endpoints() {
        let mut g = Grid::new(3);
        g.paint(Point::new(0, 0)).unwrap();
        // Clicking the start again while no end exists does not turn it into
        // the end.
        assert_eq!(g.paint(Point::new(0, 0)).unwrap(), None);
        assert_eq!(g.end(), None);

        g.paint(Point::new(1, 0)).unwrap();
        assert_eq!(g.paint(Point::new(1, 0)).unwrap(), None);
        assert_eq!(g.paint(Point::new(0, 0)).unwrap(), None);
        assert_eq!(g.barrier_count(), 0);
    }

    #[test]
    fn paint_after_erasing_start_places_a_new_start() {
        let mut g = Grid::new(3);
        g.paint(Point::new(0, 0)).unwrap();
        g.paint(Point::new(2, 2)).unwrap();
        g.paint(Point::new(1, 1)).unwrap();

        assert_eq!(g.erase(Point::new(0, 0)).unwrap(), Some(CellState::Start));
        assert_eq!(g.start(), None);
        // The barrier is overwritten by the new start.
        assert_eq!(g.paint(Point::new(1, 1)).unwrap(), Some(CellState::Start));
        assert_eq!(g.barrier_count(), 0);
    }

    #[test]
    fn erase_empty_is_a_no_op() {
        let mut g = Grid::new(2);
        assert_eq!(g.erase(Point::new(1, 1)).unwrap(), None);
        assert!(g.erase(Point::new(2, 2)).is_err());
    }

    #[test]
    fn scatter_respects_endpoints_and_is_seeded() {
        let mut g = Grid::new(10);
        g.paint(Point::new(0, 0)).unwrap();
        g.paint(Point::new(9, 9)).unwrap();

        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let added = g.scatter_barriers(&mut rng, 0.5);
        assert_eq!(added, g.barrier_count());
        assert!(added > 0 && added < 98);
        assert_eq!(g.state(Point::new(0, 0)).unwrap(), CellState::Start);
        assert_eq!(g.state(Point::new(9, 9)).unwrap(), CellState::End);

        let mut again = Grid::new(10);
        again.paint(Point::new(0, 0)).unwrap();
        again.paint(Point::new(9, 9)).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        again.scatter_barriers(&mut rng, 0.5);
        assert_eq!(again, g);
    }

    #[test]
    fn scatter_density_bounds() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mut g = Grid::new(5);
        assert_eq!(g.scatter_barriers(&mut rng, 0.0), 0);
        assert_eq!(g.scatter_barriers(&mut rng, 1.0), 25);
    }
}
