use std::collections::VecDeque;

use pathgrid_core::{Grid, Point};

use crate::error::SearchError;
use crate::session::UNREACHED;

/// Breadth-first distance map from `source` over passable cells.
///
/// Each move costs 1. The returned vector is indexed like the grid
/// ([`Grid::index`]); unreached cells hold [`UNREACHED`]. A barrier source
/// still expands into its open neighbours, matching how the grid's neighbour
/// rule treats it.
pub fn bfs_map(grid: &Grid, source: Point) -> Result<Vec<i32>, SearchError> {
    grid.cell(source)?;

    let mut dist = vec![UNREACHED; grid.len()];
    let mut queue: VecDeque<Point> = VecDeque::new();
    if let Some(si) = grid.index(source) {
        dist[si] = 0;
        queue.push_back(source);
    }

    let mut nbuf = Vec::with_capacity(4);
    while let Some(cp) = queue.pop_front() {
        let Some(ci) = grid.index(cp) else {
            continue;
        };
        let nd = dist[ci] + 1;

        nbuf.clear();
        grid.neighbors_into(cp, &mut nbuf)?;
        for &np in nbuf.iter() {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            if dist[ni] != UNREACHED {
                continue;
            }
            dist[ni] = nd;
            queue.push_back(np);
        }
    }

    Ok(dist)
}

/// Number of moves on a shortest path from `from` to `to`, or `None` when
/// `to` cannot be reached.
pub fn bfs_distance(grid: &Grid, from: Point, to: Point) -> Result<Option<i32>, SearchError> {
    grid.cell(to)?;
    let dist = bfs_map(grid, from)?;
    Ok(grid
        .index(to)
        .map(|i| dist[i])
        .filter(|&d| d != UNREACHED))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_on_open_grid_are_manhattan() {
        let g = Grid::new(4);
        let src = Point::new(1, 2);
        let dist = bfs_map(&g, src).unwrap();
        for p in g.points() {
            let i = g.index(p).unwrap();
            assert_eq!(dist[i], crate::manhattan(src, p));
        }
    }

    #[test]
    fn barriers_force_a_detour() {
        let g = Grid::parse(
            "
            S#.
            .#.
            ..E
            ",
        )
        .unwrap();
        assert_eq!(
            bfs_distance(&g, Point::new(0, 0), Point::new(0, 2)).unwrap(),
            Some(6)
        );
    }

    #[test]
    fn walled_off_target_is_unreachable() {
        let g = Grid::parse(
            "
            S#.
            ##.
            ..E
            ",
        )
        .unwrap();
        assert_eq!(
            bfs_distance(&g, Point::new(0, 0), Point::new(2, 2)).unwrap(),
            None
        );
    }

    #[test]
    fn out_of_bounds_source_is_an_error() {
        let g = Grid::new(2);
        assert!(matches!(
            bfs_map(&g, Point::new(2, 0)),
            Err(SearchError::OutOfBounds(_))
        ));
    }
}
