//! The A* state machine.
//!
//! A [`SearchSession`] borrows the grid for its whole lifetime and owns all
//! transient bookkeeping (scores, predecessors, frontier). It can be driven
//! one expansion at a time with [`step`](SearchSession::step) or to
//! completion with [`run`](SearchSession::run).

use pathgrid_core::{Grid, Point};

use crate::cancel::CancelToken;
use crate::distance::manhattan;
use crate::error::SearchError;
use crate::frontier::PriorityFrontier;
use crate::observer::{SearchObserver, SearchView};
use crate::path::{Path, PredecessorMap, reconstruct};

/// Sentinel for "no known path yet".
pub const UNREACHED: i32 = i32::MAX;

/// Cost of every move between adjacent cells.
pub const STEP_COST: i32 = 1;

/// Lifecycle of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    Running,
    Succeeded,
    Exhausted,
    Cancelled,
}

impl SearchStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Self::Running
    }
}

/// Result of a single [`SearchSession::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A cell was popped and its neighbours processed.
    Expanded(Point),
    /// The search is over; stepping again returns the same status.
    Finished(SearchStatus),
}

/// One A* run from `start` to `end` over a borrowed grid.
#[derive(Debug)]
pub struct SearchSession<'g> {
    grid: &'g Grid,
    start: Point,
    end: Point,
    g_score: Vec<i32>,
    f_score: Vec<i32>,
    came_from: PredecessorMap,
    in_frontier: Vec<bool>,
    closed: Vec<bool>,
    frontier: PriorityFrontier,
    status: SearchStatus,
    expanded: usize,
    // scratch buffer for neighbour queries
    nbuf: Vec<Point>,
}

impl<'g> SearchSession<'g> {
    /// Prepare a search. The start cell is scored and queued.
    ///
    /// Fails with [`SearchError::OutOfBounds`] if either endpoint is off the
    /// grid.
    pub fn new(grid: &'g Grid, start: Point, end: Point) -> Result<Self, SearchError> {
        grid.cell(start)?;
        grid.cell(end)?;

        let len = grid.len();
        let mut session = Self {
            grid,
            start,
            end,
            g_score: vec![UNREACHED; len],
            f_score: vec![UNREACHED; len],
            came_from: PredecessorMap::new(grid.size()),
            in_frontier: vec![false; len],
            closed: vec![false; len],
            frontier: PriorityFrontier::new(),
            status: SearchStatus::Running,
            expanded: 0,
            nbuf: Vec::with_capacity(4),
        };

        let si = session.idx(start);
        session.g_score[si] = 0;
        session.f_score[si] = manhattan(start, end);
        session.frontier.push(session.f_score[si], start);
        session.in_frontier[si] = true;
        Ok(session)
    }

    /// Pop the best frontier cell and process it.
    ///
    /// Popping `end` finishes with [`SearchStatus::Succeeded`]; an empty
    /// frontier finishes with [`SearchStatus::Exhausted`].
    pub fn step(&mut self) -> Result<Step, SearchError> {
        if self.status.is_terminal() {
            return Ok(Step::Finished(self.status));
        }
        if self.frontier.is_empty() {
            self.status = SearchStatus::Exhausted;
            return Ok(Step::Finished(self.status));
        }

        let current = self.frontier.pop_min()?;
        let ci = self.idx(current);
        self.in_frontier[ci] = false;

        if current == self.end {
            self.status = SearchStatus::Succeeded;
            return Ok(Step::Finished(self.status));
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.grid.neighbors_into(current, &mut nbuf)?;

        let tentative_g = self.g_score[ci] + STEP_COST;
        for &np in nbuf.iter() {
            let ni = self.idx(np);
            // Stale frontier priorities are never trusted: always compare
            // against the current g-score.
            if tentative_g >= self.g_score[ni] {
                continue;
            }
            self.came_from.set(np, current);
            self.g_score[ni] = tentative_g;
            self.f_score[ni] = tentative_g + manhattan(np, self.end);
            if !self.in_frontier[ni] {
                self.frontier.push(self.f_score[ni], np);
                self.in_frontier[ni] = true;
            }
        }
        self.nbuf = nbuf;

        self.closed[ci] = true;
        self.expanded += 1;
        log::trace!(
            "expanded {current} g={} frontier={}",
            self.g_score[ci],
            self.frontier.len()
        );
        Ok(Step::Expanded(current))
    }

    /// Mark the search as cancelled. No-op once terminal.
    pub fn cancel(&mut self) {
        if !self.status.is_terminal() {
            self.status = SearchStatus::Cancelled;
        }
    }

    /// Drive the search to completion.
    ///
    /// `cancel` is checked before every pop; `observer` is notified after
    /// every expansion and once more when the search ends.
    pub fn run<O>(&mut self, observer: &mut O, cancel: &CancelToken) -> Result<Path, SearchError>
    where
        O: SearchObserver + ?Sized,
    {
        log::debug!(
            "A* from {} to {} on a {n}x{n} grid",
            self.start,
            self.end,
            n = self.grid.size()
        );

        let status = loop {
            if !self.frontier.is_empty() && cancel.is_cancelled() {
                self.cancel();
            }
            match self.step()? {
                Step::Expanded(current) => observer.on_expand(&SearchView {
                    session: &*self,
                    current,
                }),
                Step::Finished(status) => break status,
            }
        };

        log::debug!(
            "A* finished: {status:?} after {} expansions",
            self.expanded
        );
        observer.on_finish(status);

        match status {
            SearchStatus::Succeeded => self.path(),
            SearchStatus::Cancelled => Err(SearchError::Cancelled {
                expanded: self.expanded,
            }),
            _ => Err(SearchError::Exhausted {
                expanded: self.expanded,
            }),
        }
    }

    /// Reconstruct the path to `end`.
    ///
    /// Fails with [`SearchError::NoPath`] unless the search succeeded.
    pub fn path(&self) -> Result<Path, SearchError> {
        if self.status != SearchStatus::Succeeded {
            return Err(SearchError::NoPath { end: self.end });
        }
        reconstruct(&self.came_from, self.start, self.end)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    fn idx(&self, p: Point) -> usize {
        // Only in-bounds points reach here: endpoints are validated in `new`
        // and neighbours come from the grid itself.
        p.row as usize * self.grid.size() as usize + p.col as usize
    }

    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Number of cells expanded so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Entries currently held by the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Best known cost from the start to `p`, if `p` has been reached.
    pub fn g_score(&self, p: Point) -> Option<i32> {
        let i = self.grid.index(p)?;
        Some(self.g_score[i]).filter(|&g| g != UNREACHED)
    }

    /// `g + h` for `p`, if `p` has been reached.
    pub fn f_score(&self, p: Point) -> Option<i32> {
        let i = self.grid.index(p)?;
        Some(self.f_score[i]).filter(|&f| f != UNREACHED)
    }

    /// Recorded predecessor of `p` on its best known path.
    pub fn came_from(&self, p: Point) -> Option<Point> {
        self.came_from.get(p)
    }

    /// Whether `p` currently has a frontier entry.
    pub fn is_open(&self, p: Point) -> bool {
        self.grid.index(p).is_some_and(|i| self.in_frontier[i])
    }

    /// Whether `p` has been expanded.
    pub fn is_closed(&self, p: Point) -> bool {
        self.grid.index(p).is_some_and(|i| self.closed[i])
    }

    /// Every reached cell with its g-score, in row-major order.
    pub fn g_scores(&self) -> impl Iterator<Item = (Point, i32)> + '_ {
        self.g_score
            .iter()
            .enumerate()
            .filter(|&(_, &g)| g != UNREACHED)
            .map(|(i, &g)| (self.grid.point(i), g))
    }
}

/// Run A* from `start` to `end` on `grid`.
///
/// Returns the shortest path (both endpoints included), or
/// [`SearchError::Exhausted`] when none exists and
/// [`SearchError::Cancelled`] when `cancel` was raised first.
pub fn run<O>(
    grid: &Grid,
    start: Point,
    end: Point,
    observer: &mut O,
    cancel: &CancelToken,
) -> Result<Path, SearchError>
where
    O: SearchObserver + ?Sized,
{
    SearchSession::new(grid, start, end)?.run(observer, cancel)
}
